//! Where ledger files live.
//!
//! The data directory comes from `--data-dir`, then `POCKETLEDGER_DATA_DIR`,
//! then the platform data directory.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const DATA_DIR_ENV: &str = "POCKETLEDGER_DATA_DIR";
pub(crate) const PASSWORD_ENV: &str = "POCKETLEDGER_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) data_dir: PathBuf,
}

impl Settings {
    pub(crate) fn resolve(flag: Option<&str>) -> Result<Self> {
        Self::resolve_with(flag, std::env::var(DATA_DIR_ENV).ok())
    }

    fn resolve_with(flag: Option<&str>, env: Option<String>) -> Result<Self> {
        let explicit = flag
            .filter(|p| !p.trim().is_empty())
            .map(str::to_string)
            .or_else(|| env.filter(|p| !p.trim().is_empty()));

        let data_dir = match explicit {
            Some(path) => PathBuf::from(shellexpand(&path)),
            None => default_data_dir()?,
        };

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        tracing::debug!(data_dir = %data_dir.display(), "resolved settings");
        Ok(Self { data_dir })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "pocketledger", "PocketLedger")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
