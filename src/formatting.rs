fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.round();
    let grouped = group_digits(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_price(value: f64) -> String {
    if value.is_finite() {
        format!("${value:.4}")
    } else {
        "-".to_string()
    }
}

/// Renders a fraction in `[0, 1]` as a percentage, e.g. `0.12` as `12.0%`.
pub fn format_fraction_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value * 100.0)
    } else {
        "-".to_string()
    }
}

pub fn format_tick(value: u64) -> String {
    group_digits(&value.to_string())
}
