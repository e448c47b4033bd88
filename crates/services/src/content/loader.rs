use std::sync::Arc;

use storage::ContentSource;
use study_core::model::content::BlockDraft;
use study_core::model::{Block, ContentDocument, DocumentDraft, ValidationOptions};
use tracing::{debug, error, info};

use crate::error::{ContentLoadError, ParseError};

/// Parse a whole curriculum document.
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON and `ParseError::Document`
/// for unknown discriminators, missing block payloads, or (when requested)
/// duplicate ids. No partial document is ever returned.
pub fn parse_document(
    json: &str,
    options: &ValidationOptions,
) -> Result<ContentDocument, ParseError> {
    let draft: DocumentDraft = serde_json::from_str(json)?;
    Ok(draft.validate(options)?)
}

/// Parse a single block object.
///
/// # Errors
///
/// Same failure modes as [`parse_document`], scoped to one block.
pub fn parse_block(json: &str) -> Result<Block, ParseError> {
    let draft: BlockDraft = serde_json::from_str(json)?;
    Ok(draft.validate(None)?)
}

/// Reads the curriculum resource and parses it into a document.
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    options: ValidationOptions,
}

impl ContentLoader {
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, options: ValidationOptions) -> Self {
        Self { source, options }
    }

    /// Read the resource, then parse it on the blocking pool.
    ///
    /// Must be awaited inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ContentLoadError::Resource` if the resource cannot be read,
    /// `ContentLoadError::Parse` if it is not a valid document, and
    /// `ContentLoadError::Worker` if the parse task was aborted.
    pub async fn load(&self) -> Result<ContentDocument, ContentLoadError> {
        let location = self.source.describe();
        debug!(source = %location, "loading content");

        match self.read_and_parse().await {
            Ok(doc) => {
                info!(
                    source = %location,
                    version = doc.version(),
                    modules = doc.modules().len(),
                    highlights = doc.highlights().len(),
                    "content loaded"
                );
                Ok(doc)
            }
            Err(err) => {
                error!(source = %location, error = %err, "content load failed");
                Err(err)
            }
        }
    }

    async fn read_and_parse(&self) -> Result<ContentDocument, ContentLoadError> {
        let text = self.source.read().await?;
        let options = self.options;
        let doc = tokio::task::spawn_blocking(move || parse_document(&text, &options)).await??;
        Ok(doc)
    }
}
