//! Formatting helpers for chart labels and tooltips.

/// `1234.0` → `"1,234"`; fractional counts keep one decimal.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let rounded = (value * 10.0).round() / 10.0;
    let whole = rounded.trunc().abs() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    let fraction = (rounded.fract().abs() * 10.0).round() as u64;
    if fraction == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}%")
    } else {
        format!("{value:.1}%")
    }
}

/// Count followed by an optional unit suffix.
pub fn format_with_unit(value: f64, unit: &str) -> String {
    let count = format_count(value);
    if unit.trim().is_empty() {
        count
    } else {
        format!("{count} {}", unit.trim())
    }
}
