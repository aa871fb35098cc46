//! Template loading errors.

use thiserror::Error;

/// Errors that can occur while reading or parsing a template resource.
///
/// These never escape the template stores; they are logged and the store
/// falls back to an empty mapping.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The resource could not be read.
    #[error("IO error reading {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// The resource is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The resource is valid JSON but not the expected shape.
    #[error("Format error: {0}")]
    Format(String),
}
