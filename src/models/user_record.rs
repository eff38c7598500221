use rust_decimal::Decimal;

use super::Entry;
use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    /// Hex SHA-256 of the password. Empty until registration completes.
    pub password_hash: String,
    pub entries: Vec<Entry>,
}

impl UserRecord {
    /// A record with no credential and no entries.
    pub fn empty(username: &str) -> Self {
        Self {
            username: username.to_string(),
            password_hash: String::new(),
            entries: Vec::new(),
        }
    }

    pub fn credential_is_set(&self) -> bool {
        !self.password_hash.is_empty()
    }

    pub fn append_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn clear(mut self) -> Self {
        self.entries.clear();
        self
    }

    /// Sum of all amounts; `Overflow` when it leaves the `Decimal` range.
    pub fn total(&self) -> Result<Decimal> {
        self.entries
            .iter()
            .try_fold(Decimal::ZERO, |sum, e| checked_add(sum, e.amount))
    }

    /// Amounts in stored order, for charting.
    pub fn amounts(&self) -> Vec<Decimal> {
        self.entries.iter().map(|e| e.amount).collect()
    }

    /// Summed amount per category, in order of first appearance.
    pub fn totals_by_category(&self) -> Result<Vec<(String, Decimal)>> {
        let mut totals: Vec<(String, Decimal)> = Vec::new();
        for entry in &self.entries {
            match totals.iter_mut().find(|(name, _)| *name == entry.category) {
                Some((_, sum)) => *sum = checked_add(*sum, entry.amount)?,
                None => totals.push((entry.category.clone(), entry.amount)),
            }
        }
        Ok(totals)
    }
}

fn checked_add(sum: Decimal, amount: Decimal) -> Result<Decimal> {
    sum.checked_add(amount).ok_or(LedgerError::Overflow)
}
