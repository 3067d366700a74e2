//! HTML presentation of dashboard snapshots

pub mod charts;
pub mod page;
pub mod theme;

pub use page::render_dashboard;
pub use theme::{Palette, Theme, UnknownTheme};

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text and turn `**bold**` pairs into `<strong>` tags
pub fn emphasis_to_html(text: &str) -> String {
    let parts: Vec<&str> = text.split("**").collect();
    // An unmatched marker stays literal
    let paired = if parts.len() % 2 == 1 { parts.len() } else { parts.len() - 1 };

    let mut html = String::with_capacity(text.len() + 16);
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            if i < paired {
                html.push_str(if i % 2 == 1 { "<strong>" } else { "</strong>" });
            } else {
                html.push_str("**");
            }
        }
        html.push_str(&escape_html(part));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_emphasis_pairs() {
        assert_eq!(
            emphasis_to_html("a **b** c **d**"),
            "a <strong>b</strong> c <strong>d</strong>"
        );
        assert_eq!(emphasis_to_html("no markers"), "no markers");
        assert_eq!(emphasis_to_html("**x** and ** y"), "<strong>x</strong> and ** y");
        assert_eq!(emphasis_to_html("**<b>**"), "<strong>&lt;b&gt;</strong>");
    }
}
