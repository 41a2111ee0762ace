//! Central error types for Clipnote.
//!
//! The framing math itself never fails (bad input degrades or clamps), so
//! errors only appear at the crate's edges: file IO, serialization, and wire
//! input that cannot be repaired. All errors implement `Serialize` so they
//! can cross the IPC boundary to the studio frontend as plain strings.

use serde::Serialize;
use thiserror::Error;

/// Main error type for Clipnote operations.
#[derive(Error, Debug)]
pub enum ClipnoteError {
    /// Crop settings whose numbers cannot be reasoned about (NaN/infinite)
    #[error("Invalid crop settings: {0}")]
    InvalidSettings(String),

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Errors cross the IPC boundary as their display string.
impl Serialize for ClipnoteError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for ClipnoteError {
    fn from(msg: String) -> Self {
        ClipnoteError::Other(msg)
    }
}

impl From<&str> for ClipnoteError {
    fn from(msg: &str) -> Self {
        ClipnoteError::Other(msg.to_string())
    }
}

/// Extension trait for adding context to Results.
///
/// Similar to anyhow's `Context` trait, this allows chaining context
/// information onto errors for better debugging.
///
/// # Example
/// ```ignore
/// use crate::error::{ResultExt, ClipnoteResult};
///
/// fn load_prefs() -> ClipnoteResult<UiPrefs> {
///     std::fs::read_to_string("prefs.json")
///         .context("failed to read preferences file")?;
///     // ...
/// }
/// ```
pub trait ResultExt<T> {
    /// Add context to an error, converting it to ClipnoteError::Other.
    fn context(self, msg: &str) -> ClipnoteResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> ClipnoteResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> ClipnoteResult<T> {
        self.map_err(|e| ClipnoteError::Other(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> ClipnoteResult<T> {
        self.map_err(|e| ClipnoteError::Other(format!("{}: {}", f(), e)))
    }
}

/// Type alias for Results using ClipnoteError.
pub type ClipnoteResult<T> = Result<T, ClipnoteError>;
