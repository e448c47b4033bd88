pub mod content;
mod ids;
pub mod progress;

pub use content::{
    Block, BlockKind, Chapter, ContentDocument, DocumentDraft, DocumentError, HighlightSection,
    Level, LevelName, LookupError, Module, Slide, ValidationOptions,
};
pub use ids::{ChapterId, LevelId, ModuleId, SlideId};
pub use progress::{
    ChapterProgress, LevelProgress, SlideProgress, calculate_chapter_count,
    calculate_level_progress,
};
