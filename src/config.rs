//! Immutable run configuration, built once from parsed flags.

use std::path::PathBuf;
use std::time::Duration;

use crate::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Trimmed URL from `--url`; `None` when absent or blank.
    pub url: Option<String>,
    pub show_history: bool,
    pub qr: bool,
    pub copy: bool,
    pub history_file: PathBuf,
    pub endpoint: String,
    pub timeout: Duration,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            url: cli.url.as_deref().and_then(non_blank),
            show_history: cli.history,
            qr: cli.qr,
            copy: !cli.no_copy,
            history_file: cli.history_file,
            endpoint: cli.endpoint,
            timeout: Duration::from_secs(cli.timeout),
        }
    }
}

/// Trim `s`, mapping an all-whitespace string to `None`.
pub fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}
