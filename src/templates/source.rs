//! Where template documents come from.
//!
//! Sync sources back [`TemplateStore`](super::store::TemplateStore); async
//! sources back [`AsyncTemplateStore`](super::async_store::AsyncTemplateStore).
//! Any sync source is usable as an async one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::error::TemplateError;

/// Bundled template document compiled into the crate.
pub const EMBEDDED_TEMPLATES_JSON: &str = include_str!("data/visualization_templates.json");

/// A synchronous provider of the raw template document.
pub trait TemplateSource: Send + Sync {
    /// Human-readable name used in log messages.
    fn describe(&self) -> String;

    /// Read the raw document.
    fn read(&self) -> Result<String, TemplateError>;
}

/// An asynchronous provider of the raw template document.
#[async_trait]
pub trait AsyncTemplateSource: Send + Sync {
    fn describe(&self) -> String;

    async fn read(&self) -> Result<String, TemplateError>;
}

#[async_trait]
impl<T: TemplateSource> AsyncTemplateSource for T {
    fn describe(&self) -> String {
        TemplateSource::describe(self)
    }

    async fn read(&self) -> Result<String, TemplateError> {
        TemplateSource::read(self)
    }
}

/// The document embedded at build time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl TemplateSource for EmbeddedSource {
    fn describe(&self) -> String {
        "embedded visualization_templates.json".to_string()
    }

    fn read(&self) -> Result<String, TemplateError> {
        Ok(EMBEDDED_TEMPLATES_JSON.to_string())
    }
}

/// A document on disk, read with blocking IO.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<String, TemplateError> {
        std::fs::read_to_string(&self.path).map_err(|error| TemplateError::Io {
            source_name: self.path.display().to_string(),
            error,
        })
    }
}

/// A document on disk, read through `tokio::fs`.
#[derive(Debug, Clone)]
pub struct AsyncFileSource {
    path: PathBuf,
}

impl AsyncFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AsyncTemplateSource for AsyncFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<String, TemplateError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|error| TemplateError::Io {
                source_name: self.path.display().to_string(),
                error,
            })
    }
}
