//! Presentation helpers for report text. Numeric results elsewhere in the
//! crate are never pre-formatted.

/// Insert a comma every three digits.
pub fn format_with_separators(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Round to a whole amount and separate thousands, keeping the sign.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format_with_separators(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Whole amount with a currency suffix, e.g. `1,495,200 TL`.
pub fn format_currency(value: f64, currency: &str) -> String {
    format!("{} {}", format_amount(value), currency)
}

/// Fixed-precision value, or `N/A` when absent.
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "N/A".to_string(),
    }
}
