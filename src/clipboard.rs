//! Clipboard access for the shortened URL.
//!
//! `SystemClipboard` is a thin wrapper around the `arboard` crate. On some
//! platforms or in headless CI environments clipboard initialization fails;
//! callers treat errors as non-fatal and report them as warnings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard init: {0}")]
    Init(String),

    #[error("clipboard set: {0}")]
    Set(String),
}

/// Destination for the copied result.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard. A connection is opened on each copy.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        copy_to_clipboard(text)
    }
}

/// Copy `s` to the system clipboard.
pub fn copy_to_clipboard(s: &str) -> Result<(), ClipboardError> {
    let mut ctx = arboard::Clipboard::new().map_err(|e| ClipboardError::Init(e.to_string()))?;
    ctx.set_text(s.to_owned())
        .map_err(|e| ClipboardError::Set(e.to_string()))
}
