//! Error types for manifest loading and rendering

use std::path::PathBuf;

/// Errors raised while loading or rendering a manifest.
///
/// Validation problems are not errors: they are collected into a
/// [`ValidationReport`](crate::ValidationReport) and handed back as data.
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    /// The source does not have the four-lists-of-strings shape
    #[error("Malformed manifest {origin}: {message}")]
    Malformed { origin: String, message: String },

    #[error("Failed to read manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot infer manifest format from {0:?} (expected .yaml, .yml, .json, .py or .cfg)")]
    UnknownFormat(PathBuf),

    #[error("Failed to render manifest: {0}")]
    Render(String),
}

impl ManifestError {
    pub(crate) fn malformed(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Malformed {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error reports a shape problem in the manifest content
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;
