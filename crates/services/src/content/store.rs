use std::sync::Arc;

use study_core::model::content::{find_chapter, find_level, find_module};
use study_core::model::{
    Chapter, ChapterId, ContentDocument, HighlightSection, Level, LevelId, LevelName, Module,
    ModuleId, Slide,
};
use tokio::sync::OnceCell;
use tracing::warn;

use super::loader::ContentLoader;
use crate::error::{ContentError, ContentLoadError};

/// Memoizes the curriculum document for the lifetime of the store.
///
/// The first caller drives the loader while concurrent callers wait for the
/// same result. A failed load leaves the cache empty so the next call starts
/// over. Share one store per process behind an `Arc`.
///
/// Lookups hand out clones of document nodes. Node children are shared
/// through `Arc<[_]>`, so a clone never copies a subtree.
pub struct ContentStore {
    loader: ContentLoader,
    document: OnceCell<Arc<ContentDocument>>,
}

impl ContentStore {
    #[must_use]
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            loader,
            document: OnceCell::new(),
        }
    }

    /// Return the cached document, loading it first if needed.
    ///
    /// # Errors
    ///
    /// Returns `ContentLoadError` if this attempt to load fails. The failure
    /// is not cached.
    pub async fn content(&self) -> Result<Arc<ContentDocument>, ContentLoadError> {
        let doc = self
            .document
            .get_or_try_init(|| async {
                self.loader.load().await.map(Arc::new).inspect_err(|_| {
                    warn!("content not cached; the next access retries the load");
                })
            })
            .await?;
        Ok(Arc::clone(doc))
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.document.initialized()
    }

    /// All modules in document order.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Load` if the document cannot be loaded.
    pub async fn modules(&self) -> Result<Arc<[Module]>, ContentError> {
        Ok(self.content().await?.shared_modules())
    }

    /// First module carrying `module_id`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Load`, or `ContentError::Lookup` with
    /// `ModuleNotFound`.
    pub async fn module(&self, module_id: ModuleId) -> Result<Module, ContentError> {
        let doc = self.content().await?;
        Ok(find_module(&doc, module_id)?.clone())
    }

    /// First level carrying `level_id` inside the module.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Load`, or `ContentError::Lookup` with
    /// `ModuleNotFound` / `LevelNotFound`.
    pub async fn level(&self, module_id: ModuleId, level_id: LevelId) -> Result<Level, ContentError> {
        let doc = self.content().await?;
        Ok(find_level(&doc, module_id, level_id)?.clone())
    }

    /// Chapter inside the first level of the module whose tier name is `level`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Load`, or `ContentError::Lookup` with
    /// `ModuleNotFound` / `ChapterNotFound`.
    pub async fn chapter(
        &self,
        module_id: ModuleId,
        level: LevelName,
        chapter_id: ChapterId,
    ) -> Result<Chapter, ContentError> {
        let doc = self.content().await?;
        Ok(find_chapter(&doc, module_id, level, chapter_id)?.clone())
    }

    /// Slides of a chapter, in reading order.
    ///
    /// # Errors
    ///
    /// Same as [`ContentStore::chapter`].
    pub async fn slides(
        &self,
        module_id: ModuleId,
        level: LevelName,
        chapter_id: ChapterId,
    ) -> Result<Arc<[Slide]>, ContentError> {
        let doc = self.content().await?;
        Ok(find_chapter(&doc, module_id, level, chapter_id)?.shared_slides())
    }

    /// Highlight carousels in document order.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Load` if the document cannot be loaded.
    pub async fn highlights(&self) -> Result<Arc<[HighlightSection]>, ContentError> {
        Ok(self.content().await?.shared_highlights())
    }
}
