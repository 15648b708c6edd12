//! Error types for the Falx library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`FalxError`] enum.
//!
//! # Examples
//!
//! ```
//! use falx::error::{FalxError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FalxError::config("smoothing must be non-negative"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Falx operations.
#[derive(Error, Debug)]
pub enum FalxError {
    /// I/O errors (reading or writing snapshots and config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A snapshot parsed but does not describe a consistent classifier
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Invalid configuration values
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for operations that may fail with FalxError.
pub type Result<T> = std::result::Result<T, FalxError>;

impl FalxError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        FalxError::Analysis(msg.into())
    }

    /// Create a new snapshot error.
    pub fn snapshot<S: Into<String>>(msg: S) -> Self {
        FalxError::Snapshot(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FalxError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = FalxError::analysis("bad pattern");
        assert_eq!(error.to_string(), "Analysis error: bad pattern");

        let error = FalxError::snapshot("watermark out of range");
        assert_eq!(error.to_string(), "Snapshot error: watermark out of range");

        let error = FalxError::config("negative smoothing");
        assert_eq!(error.to_string(), "Config error: negative smoothing");
    }

    #[test]
    fn test_error_kinds() {
        let errors = [
            FalxError::from(io::Error::new(io::ErrorKind::NotFound, "model.json")),
            FalxError::from(serde_json::from_str::<u32>("x").unwrap_err()),
            FalxError::analysis("bad pattern"),
            FalxError::snapshot("bad version"),
            FalxError::config("bad smoothing"),
        ];

        let kinds: Vec<&str> = errors
            .iter()
            .map(|error| match error {
                FalxError::Io(_) => "io",
                FalxError::Json(_) => "json",
                FalxError::Analysis(_) => "analysis",
                FalxError::Snapshot(_) => "snapshot",
                FalxError::Config(_) => "config",
            })
            .collect();
        assert_eq!(kinds, vec!["io", "json", "analysis", "snapshot", "config"]);
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "model.json");
        let error = FalxError::from(io_error);

        match error {
            FalxError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: FalxError = json_error.into();
        assert!(error.to_string().starts_with("JSON error:"));
    }
}
