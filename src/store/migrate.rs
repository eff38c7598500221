//! Load-time normalization of stored records.
//!
//! Files written by every earlier revision are still accepted: a bare list of
//! numbers, entries with only an amount and a category, entries with a date,
//! and the current four-field shape. Whatever comes in is upgraded to
//! [`Entry`] with sentinels filled in. The result is a fixed point: normalizing
//! already-normalized data changes nothing.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::{Entry, UserRecord};

const AMOUNT_KEY: &str = "valor";
const CATEGORY_KEY: &str = "tipo_atividade";
const DATE_KEY: &str = "data";
const TITLE_KEY: &str = "titulo";
const HASH_KEY: &str = "senha";
const ENTRIES_KEY: &str = "valores";

/// Upgrade a parsed top-level document into a record. Returns what was
/// discarded as `UnexpectedEntryShape` or `EntriesNotAList` warnings.
pub(crate) fn normalize_record(username: &str, doc: &Value) -> (UserRecord, Vec<LedgerError>) {
    let mut record = UserRecord::empty(username);
    let mut warnings = Vec::new();

    let Some(obj) = doc.as_object() else {
        return (record, warnings);
    };

    if let Some(Value::String(hash)) = obj.get(HASH_KEY) {
        record.password_hash = hash.clone();
    }

    match obj.get(ENTRIES_KEY) {
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                match normalize_entry(item) {
                    Some(entry) => record.entries.push(entry),
                    None => {
                        tracing::warn!(username, index, "dropping entry with unexpected shape");
                        warnings.push(LedgerError::UnexpectedEntryShape {
                            index,
                            found: describe(item),
                        });
                    }
                }
            }
        }
        Some(other) => {
            let found = describe(other);
            tracing::warn!(username, %found, "entry list is not a list, using no entries");
            warnings.push(LedgerError::EntriesNotAList { found });
        }
        None => {}
    }

    (record, warnings)
}

/// `None` when the value is neither a number nor an object with at least one
/// recognizable field.
pub(crate) fn normalize_entry(item: &Value) -> Option<Entry> {
    match item {
        Value::Number(_) => parse_amount(item).map(Entry::from_amount),
        Value::Object(fields) => normalize_fields(fields),
        _ => None,
    }
}

fn normalize_fields(fields: &Map<String, Value>) -> Option<Entry> {
    let recognized = [AMOUNT_KEY, CATEGORY_KEY, DATE_KEY, TITLE_KEY]
        .iter()
        .any(|key| fields.contains_key(*key));
    if !recognized {
        return None;
    }

    let amount = match fields.get(AMOUNT_KEY) {
        None | Some(Value::Null) => Decimal::ZERO,
        Some(value) => parse_amount(value)?,
    };

    Some(Entry::new(
        amount,
        text_field(fields, CATEGORY_KEY),
        text_field(fields, DATE_KEY),
        text_field(fields, TITLE_KEY),
    ))
}

/// Numbers, or strings holding a number. Exponent notation is accepted since
/// that is how large floats come back out of JSON.
fn parse_amount(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .map(|d| d.normalize())
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn describe(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    let mut shown = value.to_string();
    if shown.chars().count() > 40 {
        shown = shown.chars().take(39).collect::<String>() + "…";
    }
    format!("{kind} {shown}")
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
