//! Hierarchical lookups over a loaded document.
//!
//! Ids are unique only by convention. Every lookup returns the first match in
//! document order.

use thiserror::Error;

use crate::model::content::{Chapter, ContentDocument, Level, LevelName, Module};
use crate::model::ids::{ChapterId, LevelId, ModuleId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LookupError {
    #[error("module {module_id} not found")]
    ModuleNotFound { module_id: ModuleId },

    #[error("level {level_id} not found in module {module_id}")]
    LevelNotFound {
        module_id: ModuleId,
        level_id: LevelId,
    },

    #[error("chapter {chapter_id} not found in {level} level of module {module_id}")]
    ChapterNotFound {
        module_id: ModuleId,
        level: LevelName,
        chapter_id: ChapterId,
    },
}

/// # Errors
///
/// Returns `LookupError::ModuleNotFound` if no module carries `module_id`.
pub fn find_module(doc: &ContentDocument, module_id: ModuleId) -> Result<&Module, LookupError> {
    doc.modules()
        .iter()
        .find(|m| m.id() == module_id)
        .ok_or(LookupError::ModuleNotFound { module_id })
}

/// Resolve the module, then its first level with `level_id`.
///
/// # Errors
///
/// Returns `ModuleNotFound` or `LevelNotFound`.
pub fn find_level(
    doc: &ContentDocument,
    module_id: ModuleId,
    level_id: LevelId,
) -> Result<&Level, LookupError> {
    find_module(doc, module_id)?
        .levels()
        .iter()
        .find(|l| l.id() == level_id)
        .ok_or(LookupError::LevelNotFound {
            module_id,
            level_id,
        })
}

/// First level of the module whose tier name equals `name`.
#[must_use]
pub fn find_level_by_name(module: &Module, name: LevelName) -> Option<&Level> {
    module.levels().iter().find(|l| l.name() == name)
}

/// Resolve the module, then the first level *named* `level`, then the first
/// chapter with `chapter_id` inside that level only.
///
/// Chapters of later levels sharing the same name are never searched.
///
/// # Errors
///
/// Returns `ModuleNotFound`, or `ChapterNotFound` when either the level name
/// or the chapter id does not resolve.
pub fn find_chapter(
    doc: &ContentDocument,
    module_id: ModuleId,
    level: LevelName,
    chapter_id: ChapterId,
) -> Result<&Chapter, LookupError> {
    let module = find_module(doc, module_id)?;
    find_level_by_name(module, level)
        .and_then(|l| l.chapters().iter().find(|c| c.id() == chapter_id))
        .ok_or(LookupError::ChapterNotFound {
            module_id,
            level,
            chapter_id,
        })
}
