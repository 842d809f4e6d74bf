//! JSON-file history cache
//!
//! The durable local mirror of the history ledger: a single JSON blob under
//! one well-known path, replaced wholesale on every save. A missing file
//! reads as an empty list; a corrupt file is an error the caller may choose
//! to degrade over.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::history::HistoryRecord;
use crate::support::errors::InfraError;

use super::traits::HistoryCache;

/// History cache persisted as one JSON file
pub struct JsonHistoryCache {
    path: PathBuf,
}

impl JsonHistoryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default cache location (~/.local/share/parking-service/history.json)
    pub fn default_path() -> PathBuf {
        dirs_next::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("parking-service")
            .join("history.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryCache for JsonHistoryCache {
    fn load(&self) -> Result<Vec<HistoryRecord>, InfraError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<(), InfraError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(records)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
