//! Terminal formatting helpers

use unicode_width::UnicodeWidthStr;

use crate::yishuv::{FieldId, FieldValue};

/// Placeholder for a value the source didn't provide
pub const MISSING: &str = "—";

/// Group thousands with commas and keep at most three decimals,
/// e.g. `1234567.891` -> `1,234,567.891`
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && (grouped != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

pub fn format_count(value: u64) -> String {
    format_number(value as f64)
}

/// Display form of a field value: missing values render as "—",
/// a measured zero renders as "0".
pub fn display_value(field: FieldId, value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Null => MISSING.to_string(),
        FieldValue::Text(s) => s.to_string(),
        FieldValue::Number(n) if field == FieldId::MedianWage => format!("₪{}", format_number(n)),
        FieldValue::Number(n) => format_number(n),
    }
}

/// Pad to a display width, counting wide characters correctly
pub fn pad_right(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - current))
    }
}

pub fn pad_left(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat(width - current), text)
    }
}

/// Text progress bar, `width` cells wide
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}
