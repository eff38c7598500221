mod credentials;
mod migrate;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{LedgerError, Result};
use crate::models::{Entry, UserRecord};

pub(crate) use credentials::{authenticate, register, Session};

/// Allowed storage keys. No separators and no leading dot, so a username can
/// never escape the users directory.
const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,63}$";

static USERNAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(USERNAME_PATTERN).ok());

/// On-disk shape of a record. The username is the file name, not a field.
#[derive(Serialize)]
struct StoredRecord<'a> {
    senha: &'a str,
    valores: &'a [Entry],
}

/// A loaded record plus anything that went wrong without being fatal.
#[derive(Debug)]
pub(crate) struct Loaded {
    pub(crate) record: UserRecord,
    pub(crate) warnings: Vec<LedgerError>,
}

impl Loaded {
    fn fresh(username: &str) -> Self {
        Self {
            record: UserRecord::empty(username),
            warnings: Vec::new(),
        }
    }
}

/// One JSON file per user under `<root>/users/`.
///
/// There is no locking: two processes saving the same user race and the last
/// write wins.
pub(crate) struct Ledger {
    users_dir: PathBuf,
}

impl Ledger {
    pub(crate) fn open(root: &Path) -> Result<Self> {
        let users_dir = root.join("users");
        std::fs::create_dir_all(&users_dir).map_err(|e| LedgerError::io(&users_dir, e))?;
        tracing::debug!(dir = %users_dir.display(), "opened ledger");
        Ok(Self { users_dir })
    }

    pub(crate) fn path_for(&self, username: &str) -> Result<PathBuf> {
        validate_username(username)?;
        Ok(self.users_dir.join(format!("{username}.json")))
    }

    /// Whether a file exists for `username`. Registration never relies on
    /// this; it checks [`UserRecord::credential_is_set`] instead.
    pub(crate) fn has_record(&self, username: &str) -> Result<bool> {
        Ok(self.path_for(username)?.is_file())
    }

    /// Read and normalize the record for `username`.
    ///
    /// A missing file gives a fresh record and creates nothing. A file that
    /// is not a JSON object gives a fresh record and a `ParseFailure`
    /// warning; its content is lost on the next save.
    pub(crate) fn load(&self, username: &str) -> Result<Loaded> {
        let path = self.path_for(username)?;

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(username, "no stored record");
                return Ok(Loaded::fresh(username));
            }
            Err(e) => return Err(LedgerError::io(path, e)),
        };

        let doc = match serde_json::from_slice::<Value>(&bytes) {
            Ok(doc) if doc.is_object() => doc,
            Ok(_) => return Ok(parse_failure(username, path, "top level is not an object".into())),
            Err(e) => return Ok(parse_failure(username, path, e.to_string())),
        };

        let (record, warnings) = migrate::normalize_record(username, &doc);
        tracing::debug!(
            username,
            entries = record.entries.len(),
            dropped = warnings.len(),
            "loaded record"
        );
        Ok(Loaded { record, warnings })
    }

    /// Overwrite the stored record with `record`.
    pub(crate) fn save(&self, record: &UserRecord) -> Result<()> {
        let path = self.path_for(&record.username)?;
        let stored = StoredRecord {
            senha: &record.password_hash,
            valores: &record.entries,
        };
        let json = serde_json::to_vec_pretty(&stored)?;
        std::fs::write(&path, json).map_err(|e| LedgerError::io(&path, e))?;
        tracing::debug!(
            username = %record.username,
            entries = record.entries.len(),
            "saved record"
        );
        Ok(())
    }
}

fn parse_failure(username: &str, path: PathBuf, reason: String) -> Loaded {
    tracing::warn!(username, %reason, "stored record is unreadable, starting empty");
    let mut loaded = Loaded::fresh(username);
    loaded
        .warnings
        .push(LedgerError::ParseFailure { path, reason });
    loaded
}

pub(crate) fn validate_username(username: &str) -> Result<()> {
    let valid = USERNAME_RE
        .as_ref()
        .is_some_and(|re| re.is_match(username));
    if valid {
        Ok(())
    } else {
        Err(LedgerError::InvalidUsername {
            username: username.to_string(),
        })
    }
}

#[cfg(test)]
mod tests;
