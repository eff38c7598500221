//! Plain-text rendering of records for the terminal.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::Entry;

const BAR_WIDTH: usize = 40;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

pub(crate) fn entries_table(entries: &[Entry]) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{:>4} {:<10} {:<24} {:<16} {:>14}",
            "#", "Date", "Title", "Category", "Amount"
        ),
        "─".repeat(72),
    ];
    for (i, e) in entries.iter().enumerate() {
        lines.push(format!(
            "{:>4} {:<10} {:<24} {:<16} {:>14}",
            i + 1,
            truncate(&e.date, 10),
            truncate(&e.title, 24),
            truncate(&e.category, 16),
            format_amount(e.amount),
        ));
    }
    lines
}

/// Horizontal bars scaled to the largest absolute value. Negative amounts
/// are drawn with a different glyph.
pub(crate) fn bar_chart(rows: &[(String, Decimal)]) -> Vec<String> {
    let max = rows
        .iter()
        .map(|(_, v)| v.abs())
        .max()
        .unwrap_or(Decimal::ZERO);
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count().min(16))
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(label, value)| {
            let len = bar_len(value.abs(), max);
            let glyph = if *value < Decimal::ZERO { "░" } else { "█" };
            format!(
                "{:<lw$} {:<bw$} {}",
                truncate(label, 16),
                glyph.repeat(len),
                format_amount(*value),
                lw = label_width,
                bw = BAR_WIDTH,
            )
        })
        .collect()
}

fn bar_len(value: Decimal, max: Decimal) -> usize {
    if max.is_zero() {
        return 0;
    }
    (value / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH)
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
