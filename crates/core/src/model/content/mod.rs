pub mod block;
pub mod document;
pub mod level;
pub mod locate;

pub use block::{Block, BlockDraft, BlockKind};
pub use document::{
    Chapter, ChapterDraft, ContentDocument, DocumentDraft, DocumentError, HighlightDraft,
    HighlightSection, Level, LevelDraft, Module, ModuleDraft, Slide, SlideDraft, ValidationOptions,
};
pub use level::{LevelName, UnknownLevelName};
pub use locate::{LookupError, find_chapter, find_level, find_level_by_name, find_module};
