//! The command sequence: read the URL, shorten it, then the best-effort
//! steps (clipboard, history, QR).
//!
//! Fatal failures come back as `RunError`. Best-effort failures never stop
//! the run; they are printed as `warning:` lines on the error stream and
//! collected in `Outcome::warnings`.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clipboard::{ClipboardError, ClipboardSink};
use crate::config::{Config, non_blank};
use crate::history::{HistoryEntry, HistoryError, HistoryStore, format_entry};
use crate::qr::{self, QrError};
use crate::shorten::{ShortenError, Shortener};

pub const BANNER: &str = "urlshort: shorten a long URL";
pub const PROMPT: &str = "Enter a long URL: ";
pub const USAGE: &str = "Usage: urlshort [--url <URL>] [--history] [--qr] [--no-copy]";

#[derive(Debug, Error)]
pub enum RunError {
    #[error("no URL provided")]
    MissingUrl,

    #[error(transparent)]
    Shorten(#[from] ShortenError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// A best-effort step that failed.
#[derive(Debug, Error)]
pub enum Warning {
    #[error("could not copy to clipboard: {0}")]
    Clipboard(#[source] ClipboardError),

    #[error("could not save history: {0}")]
    History(#[source] HistoryError),

    #[error("could not render QR code: {0}")]
    Qr(#[source] QrError),
}

#[derive(Debug, Default)]
pub struct Outcome {
    /// The short URL, absent in history-listing mode.
    pub short_url: Option<String>,
    pub warnings: Vec<Warning>,
}

/// One invocation of the CLI.
pub struct App<'a> {
    config: &'a Config,
    shortener: &'a dyn Shortener,
    clipboard: &'a mut dyn ClipboardSink,
    history: HistoryStore,
}

impl<'a> App<'a> {
    pub fn new(
        config: &'a Config,
        shortener: &'a dyn Shortener,
        clipboard: &'a mut dyn ClipboardSink,
    ) -> Self {
        let history = HistoryStore::new(&config.history_file);
        Self {
            config,
            shortener,
            clipboard,
            history,
        }
    }

    pub fn run(
        &mut self,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Outcome, RunError> {
        if self.config.show_history {
            self.print_history(out)?;
            return Ok(Outcome::default());
        }

        writeln!(out, "{}", BANNER)?;
        let long_url = match &self.config.url {
            Some(url) => url.clone(),
            None => prompt_url(input, out)?.ok_or(RunError::MissingUrl)?,
        };

        let short_url = self.shortener.shorten(&long_url)?;
        info!(original = %long_url, short = %short_url, "shortened");
        writeln!(out, "Shortened URL: {}", short_url)?;
        writeln!(out, "Original URL: {}", long_url)?;

        let mut warnings = Vec::new();

        if self.config.copy {
            match self.clipboard.copy(&short_url) {
                Ok(()) => writeln!(out, "(copied to clipboard)")?,
                Err(e) => warnings.push(Warning::Clipboard(e)),
            }
        }

        let entry = HistoryEntry::new(long_url, short_url.clone());
        if let Err(e) = self.history.append(entry) {
            warnings.push(Warning::History(e));
        }

        if self.config.qr {
            match qr::render(&short_url) {
                Ok(code) => write!(out, "\n{}", code)?,
                Err(e) => warnings.push(Warning::Qr(e)),
            }
        }

        for w in &warnings {
            warn!("{}", w);
            writeln!(err, "warning: {}", w)?;
        }

        Ok(Outcome {
            short_url: Some(short_url),
            warnings,
        })
    }

    /// Print a snapshot of the history, one 1-indexed line per entry.
    fn print_history(&self, out: &mut dyn Write) -> Result<(), RunError> {
        let entries = self.history.list()?;
        debug!(count = entries.len(), path = %self.history.path().display(), "listing history");
        if entries.is_empty() {
            writeln!(out, "No history yet.")?;
        }
        for (i, entry) in entries.iter().enumerate() {
            writeln!(out, "{}", format_entry(i + 1, entry))?;
        }
        Ok(())
    }
}

/// Prompt for a URL and read one line. Returns `None` for blank input or
/// end of input.
fn prompt_url(input: &mut dyn BufRead, out: &mut dyn Write) -> io::Result<Option<String>> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(non_blank(&line))
}

/// Run `App` and map its result to a process exit code, printing fatal
/// errors to `err`.
pub fn execute(
    config: &Config,
    shortener: &dyn Shortener,
    clipboard: &mut dyn ClipboardSink,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let result = App::new(config, shortener, clipboard).run(input, out, err);
    match result {
        Ok(_) => 0,
        Err(e) => {
            let _ = writeln!(err, "error: {}", e);
            if matches!(e, RunError::MissingUrl) {
                let _ = writeln!(err, "{}", USAGE);
            }
            1
        }
    }
}
