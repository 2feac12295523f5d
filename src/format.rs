//! Display formatting shared by the vector, markup and print renderings.

use chrono::{Datelike, NaiveDate};

/// Parse a date as the invoice sources write it.
///
/// Accepts `YYYY-MM-DD`, an ISO timestamp starting with one, and `DD.MM.YYYY`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = match trimmed.char_indices().nth(10) {
        Some((idx, 'T')) | Some((idx, ' ')) => &trimmed[..idx],
        _ => trimmed,
    };

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d.%m.%Y"))
        .ok()
}

/// Format a date as `DD.MM.YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{}", date.day(), date.month(), date.year())
}

/// Format a raw date string for display.
///
/// Unparseable input is shown as written rather than silently dropped.
pub fn display_date(input: Option<&str>) -> Option<String> {
    let raw = input.map(str::trim).filter(|s| !s.is_empty())?;
    Some(parse_date(raw).map(format_date).unwrap_or_else(|| raw.to_string()))
}

/// Two decimals and a euro suffix: `42.50 €`.
pub fn format_amount(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    // avoid "-0.00"
    let rounded = (amount * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.2} €", rounded)
}
