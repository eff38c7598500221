//! Parsing of user-typed amounts and dates.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Accepts `$`, thousands separators and `(12.00)` for negatives.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        anyhow::bail!("Amount is empty");
    }
    // "-$5" becomes "-5" above; "--5" can only come from "(-5)"
    let cleaned = cleaned.strip_prefix("--").unwrap_or(&cleaned);
    Decimal::from_str(cleaned)
        .map(|d| d.normalize())
        .with_context(|| format!("Failed to parse '{s}' as an amount"))
}

/// Parse a date in any of the common formats and return it as `YYYY-MM-DD`.
pub(crate) fn parse_date(s: &str) -> Result<String> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%m/%d/%y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d.format("%Y-%m-%d").to_string());
        }
    }
    anyhow::bail!("Could not parse date: {s}")
}

pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
