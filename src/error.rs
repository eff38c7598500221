use std::path::PathBuf;
use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;

/// Everything the ledger core can report. None of these are fatal to the
/// process; `ParseFailure`, `UnexpectedEntryShape` and `EntriesNotAList`
/// only ever show up as load warnings.
#[derive(Error, Debug)]
pub(crate) enum LedgerError {
    #[error("user '{username}' already exists")]
    AlreadyExists { username: String },

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("username and password are both required")]
    MissingCredentials,

    #[error("invalid username '{username}': use letters, digits, '_', '.' or '-' (max 64, no leading '.' or '-')")]
    InvalidUsername { username: String },

    #[error("could not parse {}: {reason}; starting from an empty record, the file will be overwritten on next save", path.display())]
    ParseFailure { path: PathBuf, reason: String },

    #[error("dropped entry #{index}: unexpected shape {found}")]
    UnexpectedEntryShape { index: usize, found: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sum of amounts is too large to represent")]
    Overflow,

    #[error("entry list is {found}; starting with no entries, the stored value will be overwritten on next save")]
    EntriesNotAList { found: String },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Export(#[from] csv::Error),
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
