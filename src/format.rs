//! Display formatting for report values.
//!
//! Every missing value goes through [`or_na`] (or one of the typed helpers
//! built on it) so the placeholder is the same everywhere in the document.

use chrono::NaiveDateTime;

pub const PLACEHOLDER: &str = "N/A";

/// The value itself, or the placeholder when it is absent or blank.
pub fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Format a present value with `f`, or the placeholder.
pub fn map_or_na<T>(value: Option<T>, f: impl FnOnce(T) -> String) -> String {
    value.map(f).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Group the integer part in thousands with commas: `1234567.5, 2` -> `1,234,567.50`.
pub fn grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    // "-0" is not worth printing
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Rupee amount: `Rs500,000` (0 decimals) or `Rs4,000.00` (2 decimals).
pub fn rupees(value: f64, decimals: usize) -> String {
    format!("Rs{}", grouped(value, decimals))
}

pub fn rupees_or_na(value: Option<f64>, decimals: usize) -> String {
    map_or_na(value, |v| rupees(v, decimals))
}

/// Whole numbers print without a fractional part, others as-is: `20`, `2.5`.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// `25 years`, or the placeholder.
pub fn years_or_na(value: Option<f64>) -> String {
    map_or_na(value, |v| format!("{} years", plain_number(v)))
}

/// `42.50%`, or the placeholder.
pub fn percent_or_na(value: Option<f64>, decimals: usize) -> String {
    map_or_na(value, |v| format!("{v:.decimals$}%"))
}

/// Completion figures print the way they were supplied: `80%`, `66.7%`.
pub fn completion_or_na(value: Option<f64>) -> String {
    map_or_na(value, |v| format!("{}%", plain_number(v)))
}

/// Capitalize the first letter of every alphabetic run and lowercase the
/// rest: `home_loan` -> `Home_Loan`, `CREDIT card` -> `Credit Card`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// `18 October 2026, 03:45 PM`
pub fn generation_timestamp(at: &NaiveDateTime) -> String {
    at.format("%d %B %Y, %I:%M %p").to_string()
}
