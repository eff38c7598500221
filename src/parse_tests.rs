#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_basic() {
    assert_eq!(parse_amount("100.50").unwrap(), dec!(100.5));
    assert_eq!(parse_amount("-42.99").unwrap(), dec!(-42.99));
    assert_eq!(parse_amount("42").unwrap(), dec!(42));
}

#[test]
fn test_parse_amount_with_currency() {
    assert_eq!(parse_amount("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_amount("-$99.99").unwrap(), dec!(-99.99));
}

#[test]
fn test_parse_amount_parentheses_negative() {
    assert_eq!(parse_amount("(500.00)").unwrap(), dec!(-500));
}

#[test]
fn test_parse_amount_normalized() {
    assert_eq!(parse_amount("7.10").unwrap().to_string(), "7.1");
}

#[test]
fn test_parse_amount_rejects_empty_and_garbage() {
    assert!(parse_amount("").is_err());
    assert!(parse_amount("  ").is_err());
    assert!(parse_amount("ten").is_err());
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_iso() {
    assert_eq!(parse_date("2024-01-15").unwrap(), "2024-01-15");
}

#[test]
fn test_parse_date_us_format_normalized() {
    assert_eq!(parse_date("01/15/2024").unwrap(), "2024-01-15");
}

#[test]
fn test_parse_date_day_first_when_unambiguous() {
    assert_eq!(parse_date("25/12/2024").unwrap(), "2024-12-25");
}

#[test]
fn test_parse_date_invalid() {
    assert!(parse_date("2024-13-45").is_err());
    assert!(parse_date("yesterday").is_err());
}

#[test]
fn test_today_is_iso() {
    let t = today();
    assert_eq!(parse_date(&t).unwrap(), t);
}
