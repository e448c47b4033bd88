//! Shared error types for the services crate.

use thiserror::Error;

use storage::SourceError;
use study_core::model::{DocumentError, LookupError};

/// The curriculum text could not be turned into a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("malformed content JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl ParseError {
    /// True when a block carried a `type` outside the known set.
    #[must_use]
    pub fn is_unknown_block_type(&self) -> bool {
        matches!(
            self,
            ParseError::Document(DocumentError::UnknownBlockType { .. })
        )
    }

    /// True when a level carried a name outside the known tiers.
    #[must_use]
    pub fn is_unknown_level_type(&self) -> bool {
        matches!(
            self,
            ParseError::Document(DocumentError::UnknownLevelType { .. })
        )
    }
}

/// Errors emitted by `ContentLoader`. Fatal for the load attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentLoadError {
    #[error("failed to read content: {0}")]
    Resource(#[from] SourceError),
    #[error("failed to parse content: {0}")]
    Parse(#[from] ParseError),
    #[error("content parse worker stopped: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Errors emitted by `ContentStore` lookups and the services built on it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error(transparent)]
    Load(#[from] ContentLoadError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
