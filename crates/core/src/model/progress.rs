use crate::model::content::{Chapter, Level, LevelName};
use crate::model::ids::{ChapterId, LevelId, SlideId};

//
// ─── PROJECTIONS ───────────────────────────────────────────────────────────────
//

/// Completion flag of a single slide, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideProgress {
    pub slide_id: SlideId,
    pub is_completed: bool,
}

/// Slides of one chapter with their completion flags, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterProgress {
    pub chapter_id: ChapterId,
    pub slides: Vec<SlideProgress>,
}

/// Per-level projection of the content tree joined with completion state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelProgress {
    pub level_id: LevelId,
    pub name: LevelName,
    pub chapters: Vec<ChapterProgress>,
}

impl ChapterProgress {
    pub fn from_chapter(chapter: &Chapter, is_complete: impl Fn(SlideId) -> bool) -> Self {
        let slides = chapter
            .slides()
            .iter()
            .map(|s| SlideProgress {
                slide_id: s.id(),
                is_completed: is_complete(s.id()),
            })
            .collect();
        Self {
            chapter_id: chapter.id(),
            slides,
        }
    }

    #[must_use]
    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn completed_slides(&self) -> usize {
        self.slides.iter().filter(|s| s.is_completed).count()
    }

    /// Completed share of this chapter, `0.0` when it has no slides.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        ratio(self.completed_slides(), self.total_slides())
    }
}

impl LevelProgress {
    pub fn from_level(level: &Level, is_complete: impl Fn(SlideId) -> bool) -> Self {
        let chapters = level
            .chapters()
            .iter()
            .map(|c| ChapterProgress::from_chapter(c, &is_complete))
            .collect();
        Self {
            level_id: level.id(),
            name: level.name(),
            chapters,
        }
    }

    #[must_use]
    pub fn total_slides(&self) -> usize {
        self.chapters.iter().map(ChapterProgress::total_slides).sum()
    }

    #[must_use]
    pub fn completed_slides(&self) -> usize {
        self.chapters.iter().map(ChapterProgress::completed_slides).sum()
    }
}

//
// ─── CALCULATIONS ──────────────────────────────────────────────────────────────
//

/// Share of completed slides across every chapter of the level.
///
/// Every slide weighs the same. Returns `0.0` for a level without slides and
/// never rounds.
#[must_use]
pub fn calculate_level_progress(progress: &LevelProgress) -> f32 {
    ratio(progress.completed_slides(), progress.total_slides())
}

#[must_use]
pub fn calculate_chapter_count(level: &Level) -> usize {
    level.chapters().len()
}

#[allow(clippy::cast_precision_loss)]
fn ratio(completed: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    completed as f32 / total as f32
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
