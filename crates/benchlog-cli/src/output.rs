/// Format a key-value pair for display.
pub fn kv(key: &str, value: &str) -> String {
    format!("{key:>16}: {value}")
}

/// Format a header line.
pub fn header(title: &str) -> String {
    format!("=== {title} ===")
}

/// Render a measurement value compactly, keeping integers integral.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
    }
}
