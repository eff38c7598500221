use sha2::{Digest, Sha256};

use super::Ledger;
use crate::error::{LedgerError, Result};
use crate::models::UserRecord;

/// Proof that a username/password pair was accepted. Callers hand this to
/// every ledger operation instead of keeping a global logged-in flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Session {
    username: String,
}

impl Session {
    pub(crate) fn username(&self) -> &str {
        &self.username
    }
}

/// Unsalted hex SHA-256 of the raw password bytes.
pub(crate) fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Create the record for `username`, or take over a record whose credential
/// was never set. Existing entries of such a record are discarded.
pub(crate) fn register(ledger: &Ledger, username: &str, password: &str) -> Result<()> {
    require_credentials(username, password)?;

    let loaded = ledger.load(username)?;
    for warning in &loaded.warnings {
        tracing::warn!(username, "{warning}");
    }
    if loaded.record.credential_is_set() {
        return Err(LedgerError::AlreadyExists {
            username: username.to_string(),
        });
    }

    let record = UserRecord {
        username: username.to_string(),
        password_hash: hash_password(password),
        entries: Vec::new(),
    };
    ledger.save(&record)?;
    tracing::info!(username, "registered user");
    Ok(())
}

/// Check a username/password pair. Unknown users, users without a
/// credential and wrong passwords all fail the same way.
pub(crate) fn authenticate(ledger: &Ledger, username: &str, password: &str) -> Result<Session> {
    require_credentials(username, password)?;

    let loaded = match ledger.load(username) {
        Ok(loaded) => loaded,
        Err(LedgerError::InvalidUsername { .. }) => return Err(LedgerError::InvalidCredentials),
        Err(e) => return Err(e),
    };
    let record = loaded.record;

    if !record.credential_is_set() || record.password_hash != hash_password(password) {
        tracing::debug!(username, "authentication failed");
        return Err(LedgerError::InvalidCredentials);
    }

    Ok(Session {
        username: record.username,
    })
}

fn require_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(LedgerError::MissingCredentials);
    }
    Ok(())
}
