//! Error types for the GAINS core.
//!
//! Bad user data never produces one of these: malformed CSV degrades to fewer
//! rows, incomplete selections degrade to the default artifact and invalid
//! edits are no-ops. These variants cover contract violations and I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the library.
#[derive(Debug, Error)]
pub enum GainsError {
    // === Contract Errors ===
    /// Kind id is not one of the supported visualizations.
    #[error("unknown visualization kind '{0}'")]
    UnknownKind(String),

    /// Role name is not one of the supported roles.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// Role is not used by the given visualization kind.
    #[error("role '{role}' is not used by {kind}")]
    RoleNotApplicable { role: String, kind: String },

    /// A template referenced a placeholder with no binding.
    #[error("template placeholder '${{{0}}}' is not bound")]
    UndefinedPlaceholder(String),

    /// A JSON dataset did not have the array-of-objects shape.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// Role expression could not be parsed.
    #[error("invalid role expression: {0}")]
    RoleExpression(String),

    // === I/O Errors ===
    /// Failed to read input text.
    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("failed to write CSV: {0}")]
    CsvWrite(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `GainsError`.
pub type Result<T> = std::result::Result<T, GainsError>;
