use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::str::FromStr;

pub const UNSPECIFIED_CATEGORY: &str = "unspecified";
pub const UNKNOWN_DATE: &str = "unknown";
pub const UNTITLED: &str = "untitled";

/// One ledger line item. Field names on disk are the ones the stored files
/// have always used, so older files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(rename = "valor", serialize_with = "serialize_amount")]
    pub amount: Decimal,
    #[serde(rename = "tipo_atividade")]
    pub category: String,
    /// Format: "YYYY-MM-DD", or [`UNKNOWN_DATE`]
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "titulo")]
    pub title: String,
}

impl Entry {
    pub fn new(
        amount: Decimal,
        category: Option<String>,
        date: Option<String>,
        title: Option<String>,
    ) -> Self {
        Self {
            amount: amount.normalize(),
            category: non_empty_or(category, UNSPECIFIED_CATEGORY),
            date: non_empty_or(date, UNKNOWN_DATE),
            title: non_empty_or(title, UNTITLED),
        }
    }

    /// A bare amount, as the earliest files stored them.
    pub fn from_amount(amount: Decimal) -> Self {
        Self::new(amount, None, None, None)
    }

    pub fn has_known_date(&self) -> bool {
        self.date != UNKNOWN_DATE
    }
}

fn non_empty_or(value: Option<String>, sentinel: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => sentinel.to_string(),
    }
}

/// Amounts are written as JSON numbers carrying the exact decimal text, so
/// all 28 digits survive a save.
fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let text = amount.normalize().to_string();
    serde_json::Number::from_str(&text)
        .map_err(<S::Error as serde::ser::Error>::custom)?
        .serialize(serializer)
}
