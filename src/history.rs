//! Conversion history persisted as a JSON file.
//!
//! The file holds a pretty-printed array of `HistoryEntry` objects in the
//! order they were recorded. A missing file is a normal cold start and loads
//! as an empty history. Writes go through a temporary file in the same
//! directory which is then renamed over the target, so an interrupted write
//! never leaves a truncated history behind.
//!
//! Timestamps are kept as the exact RFC3339 string that was written; they are
//! never re-parsed or re-formatted on load.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// File name used when no history path is configured.
pub const DEFAULT_HISTORY_FILE: &str = "url_history.json";

/// A single recorded conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub original_url: String,
    pub shortened_url: String,
    pub timestamp: String,
}

impl HistoryEntry {
    /// Create an entry stamped with the current UTC time.
    pub fn new(original_url: impl Into<String>, shortened_url: impl Into<String>) -> Self {
        Self::at(original_url, shortened_url, Utc::now())
    }

    /// Create an entry stamped with `when`, formatted as RFC3339 with second
    /// precision and a `Z` suffix.
    pub fn at(
        original_url: impl Into<String>,
        shortened_url: impl Into<String>,
        when: DateTime<Utc>,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            shortened_url: shortened_url.into(),
            timestamp: when.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse history file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write history file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Serialize `entries` as a two-space indented JSON array.
pub fn encode(entries: &[HistoryEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

/// Parse a JSON array of entries, preserving order.
pub fn decode(text: &str) -> Result<Vec<HistoryEntry>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Render one entry for the history listing. `index` is 1-based.
pub fn format_entry(index: usize, entry: &HistoryEntry) -> String {
    format!(
        "{}. {} -> {} ({})",
        index, entry.original_url, entry.shortened_url, entry.timestamp
    )
}

/// History backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries. A missing file yields an empty history.
    pub fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "history file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        decode(&text).map_err(|source| HistoryError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Entries in insertion order, for display.
    pub fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        self.load()
    }

    /// Append one entry and rewrite the file.
    pub fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.save(&entries)
    }

    /// Replace the file contents with `entries`.
    ///
    /// The data is written to a temporary file next to the target and then
    /// renamed into place.
    pub fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let write_err = |source: io::Error| HistoryError::Write {
            path: self.path.clone(),
            source,
        };

        let text = encode(entries).map_err(|e| write_err(io::Error::other(e)))?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        // The temp file starts out owner-only; keep the target's mode instead.
        let perms = match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        };
        if let Some(perms) = perms {
            tmp.as_file().set_permissions(perms).map_err(write_err)?;
        }
        tmp.write_all(text.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!(path = %self.path.display(), count = entries.len(), "history saved");
        Ok(())
    }
}

/// Mode for a newly created history file.
#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
