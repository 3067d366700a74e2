/// Format a percentage value with two decimals, e.g. `0.84%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a price with a dollar sign, e.g. `$172.30`
pub fn format_price(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

/// Format percentage with sign
pub fn format_percentage_with_sign(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}
