//! Error types for indexing runs.
//!
//! Only [`IndexError::InvalidWorkspaceRoot`] aborts a run. Every other variant
//! is scoped to one document, which is then left out of the index.

use crate::base::LanguageId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading a solution or indexing its documents.
#[derive(Debug, Error)]
pub enum IndexError {
    /// No document walker is registered for the document's language.
    #[error("no walker registered for language `{language}`: {}", path.display())]
    UnsupportedLanguage { language: LanguageId, path: PathBuf },

    /// The semantic engine produced no usable tree for the document.
    #[error("malformed syntax tree for {}: {reason}", path.display())]
    MalformedTree { path: PathBuf, reason: String },

    /// The workspace root is missing or not a directory.
    #[error("invalid workspace root `{}`: {reason}", path.display())]
    InvalidWorkspaceRoot { path: PathBuf, reason: String },

    /// A source file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal error during discovery.
    #[error("directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl IndexError {
    pub fn unsupported_language(language: LanguageId, path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedLanguage {
            language,
            path: path.into(),
        }
    }

    pub fn malformed_tree(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidWorkspaceRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts the whole indexing run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidWorkspaceRoot { .. })
    }
}

/// Result alias used across the crate.
pub type IndexResult<T> = Result<T, IndexError>;
