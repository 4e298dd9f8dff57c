//! Unified Error Type
//!
//! One error enum for the whole crate, following the error kinds of the
//! design (input errors, missing sources/manifest, malformed intermediate
//! files, and an opaque internal-error bucket for the extractor/I/O layer).
//! The core (`core::subpatterns`, `core::patterns`) never constructs one of
//! these — it is total by contract.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatroidError>;

#[derive(Debug, Error)]
pub enum PatroidError {
    #[error("no input supplied: use --path, --dir, or --module-file")]
    InputMissing,

    #[error("project at {path} contains no analyzable source files")]
    NoSources { path: PathBuf },

    #[error("project at {path} has no manifest file")]
    NoManifest { path: PathBuf },

    #[error("module file {path} is malformed: {message}")]
    MalformedGraph { path: PathBuf, message: String },

    #[error("internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    #[error("XML encode error: {0}")]
    XmlEncode(#[from] quick_xml::se::SeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl PatroidError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Extension trait for attaching project-path context to a lower-level error.
pub trait ResultExt<T> {
    fn with_project_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_project_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| match e {
            PatroidError::Internal(msg) => {
                PatroidError::internal(format!("{} (project: {})", msg, path.display()))
            }
            other => other,
        })
    }
}
