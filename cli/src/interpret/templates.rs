use crate::models::{Bias, Uncertainty};

/// How emphasis is marked in the rendered narrative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NarrativeStyle {
    /// `**bold**` markers around the classification and numbers
    #[default]
    Markdown,
    Plain,
}

impl NarrativeStyle {
    fn emphasize(&self, text: &str) -> String {
        match self {
            NarrativeStyle::Markdown => format!("**{}**", text),
            NarrativeStyle::Plain => text.to_string(),
        }
    }
}

pub struct NarrativeInput<'a> {
    pub subject_label: &'a str,
    pub horizon_label: &'a str,
    pub bias: Bias,
    pub uncertainty: Uncertainty,
    pub median_return_pct: f64,
    pub lower_price: f64,
    pub upper_price: f64,
}

pub fn render_narrative(input: &NarrativeInput<'_>, style: NarrativeStyle) -> String {
    format!(
        "Over the {}, {} is expected to show a {}, \
         with a median projected return of {}. \
         The expected price range lies between {} and {}, \
         indicating {} in short-term price movements.",
        input.horizon_label,
        input.subject_label,
        style.emphasize(&format!("{} bias", input.bias)),
        style.emphasize(&format!("{:.2}%", input.median_return_pct)),
        style.emphasize(&format!("{:.2}", input.lower_price)),
        style.emphasize(&format!("{:.2}", input.upper_price)),
        style.emphasize(&format!("{} uncertainty", input.uncertainty)),
    )
}
