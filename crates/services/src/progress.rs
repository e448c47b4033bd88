use std::sync::Arc;

use storage::SlideCompletion;
use study_core::model::{
    ChapterId, ChapterProgress, LevelId, LevelName, LevelProgress, ModuleId,
    calculate_chapter_count, calculate_level_progress,
};

use crate::content::ContentStore;
use crate::error::ContentError;

/// One row of a module screen: a level with the two numbers shown beside it.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub level_id: LevelId,
    pub name: LevelName,
    pub image: String,
    pub chapter_count: usize,
    /// Completed share of the level's slides, unrounded, in `[0.0, 1.0]`.
    pub progress: f32,
}

/// Joins the content tree with caller-owned slide completion.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<ContentStore>,
    completion: Arc<dyn SlideCompletion>,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<ContentStore>, completion: Arc<dyn SlideCompletion>) -> Self {
        Self { store, completion }
    }

    /// Per-level projection with a completion flag for every slide.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the content cannot be loaded or the level
    /// does not resolve.
    pub async fn level_progress(
        &self,
        module_id: ModuleId,
        level_id: LevelId,
    ) -> Result<LevelProgress, ContentError> {
        let level = self.store.level(module_id, level_id).await?;
        Ok(LevelProgress::from_level(&level, |id| {
            self.completion.is_slide_complete(id)
        }))
    }

    /// Completed share of a level, see [`calculate_level_progress`].
    ///
    /// # Errors
    ///
    /// Same as [`ProgressService::level_progress`].
    pub async fn level_fraction(
        &self,
        module_id: ModuleId,
        level_id: LevelId,
    ) -> Result<f32, ContentError> {
        let progress = self.level_progress(module_id, level_id).await?;
        Ok(calculate_level_progress(&progress))
    }

    /// Slide counts for a chapter card.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the content cannot be loaded or the chapter
    /// does not resolve.
    pub async fn chapter_progress(
        &self,
        module_id: ModuleId,
        level: LevelName,
        chapter_id: ChapterId,
    ) -> Result<ChapterProgress, ContentError> {
        let chapter = self.store.chapter(module_id, level, chapter_id).await?;
        Ok(ChapterProgress::from_chapter(&chapter, |id| {
            self.completion.is_slide_complete(id)
        }))
    }

    /// Every level of a module with its chapter count and progress.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the content cannot be loaded or the module
    /// does not resolve.
    pub async fn module_overview(
        &self,
        module_id: ModuleId,
    ) -> Result<Vec<LevelSummary>, ContentError> {
        let module = self.store.module(module_id).await?;
        let summaries = module
            .levels()
            .iter()
            .map(|level| {
                let progress = LevelProgress::from_level(level, |id| {
                    self.completion.is_slide_complete(id)
                });
                LevelSummary {
                    level_id: level.id(),
                    name: level.name(),
                    image: level.image().to_owned(),
                    chapter_count: calculate_chapter_count(level),
                    progress: calculate_level_progress(&progress),
                }
            })
            .collect();
        Ok(summaries)
    }
}
