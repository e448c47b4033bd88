use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::model::content::{Block, BlockDraft, BlockKind, LevelName};
use crate::model::ids::{ChapterId, LevelId, ModuleId, SlideId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Structural problems found while turning a parsed draft into a document.
///
/// Every variant is fatal for the whole document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("unknown block type `{value}`{}", in_slide(.slide_id))]
    UnknownBlockType {
        slide_id: Option<SlideId>,
        value: String,
    },

    #[error("unknown level type `{value}` for level {level_id}")]
    UnknownLevelType { level_id: LevelId, value: String },

    #[error("{kind} block is missing `{field}`{}", in_slide(.slide_id))]
    MissingBlockField {
        slide_id: Option<SlideId>,
        kind: BlockKind,
        field: &'static str,
    },

    #[error("duplicate {scope} id {id}")]
    DuplicateId { scope: &'static str, id: String },
}

fn in_slide(slide_id: &Option<SlideId>) -> String {
    slide_id.map_or_else(String::new, |id| format!(" in slide {id}"))
}

/// Knobs applied while validating a draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject documents whose sibling ids collide instead of resolving
    /// lookups by first match.
    pub unique_ids: bool,
}

impl ValidationOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self { unique_ids: true }
    }
}

//
// ─── CONTENT TREE ──────────────────────────────────────────────────────────────
//

/// The fully parsed curriculum. Never mutated after construction.
///
/// Child collections sit behind `Arc<[_]>`, so cloning any node copies its
/// scalar fields and shares the subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDocument {
    version: i64,
    modules: Arc<[Module]>,
    highlights: Arc<[HighlightSection]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    id: ModuleId,
    title: String,
    image: String,
    description: Option<String>,
    levels: Arc<[Level]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    id: LevelId,
    name: LevelName,
    image: String,
    chapters: Arc<[Chapter]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    id: ChapterId,
    title: String,
    description: String,
    image: String,
    slides: Arc<[Slide]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    id: SlideId,
    title: String,
    blocks: Vec<Block>,
}

/// Promotional carousel content that lives outside the module tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSection {
    id: String,
    title: String,
    slides: Arc<[Slide]>,
}

impl ContentDocument {
    #[must_use]
    pub fn new(version: i64, modules: Vec<Module>, highlights: Vec<HighlightSection>) -> Self {
        Self {
            version,
            modules: modules.into(),
            highlights: highlights.into(),
        }
    }

    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn highlights(&self) -> &[HighlightSection] {
        &self.highlights
    }

    /// Shared handle to the module list.
    #[must_use]
    pub fn shared_modules(&self) -> Arc<[Module]> {
        Arc::clone(&self.modules)
    }

    #[must_use]
    pub fn shared_highlights(&self) -> Arc<[HighlightSection]> {
        Arc::clone(&self.highlights)
    }
}

impl Module {
    #[must_use]
    pub fn new(
        id: ModuleId,
        title: impl Into<String>,
        image: impl Into<String>,
        description: Option<String>,
        levels: Vec<Level>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            image: image.into(),
            description,
            levels: levels.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}

impl Level {
    #[must_use]
    pub fn new(id: LevelId, name: LevelName, image: impl Into<String>, chapters: Vec<Chapter>) -> Self {
        Self {
            id,
            name,
            image: image.into(),
            chapters: chapters.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> LevelId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> LevelName {
        self.name
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }
}

impl Chapter {
    #[must_use]
    pub fn new(
        id: ChapterId,
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        slides: Vec<Slide>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            image: image.into(),
            slides: slides.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ChapterId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Shared handle to the slides, in reading order.
    #[must_use]
    pub fn shared_slides(&self) -> Arc<[Slide]> {
        Arc::clone(&self.slides)
    }
}

impl Slide {
    #[must_use]
    pub fn new(id: SlideId, title: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            id,
            title: title.into(),
            blocks,
        }
    }

    #[must_use]
    pub fn id(&self) -> SlideId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

impl HighlightSection {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slides: slides.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }
}

//
// ─── DRAFTS (unvalidated input) ────────────────────────────────────────────────
//

/// The curriculum JSON as deserialized, before discriminators are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentDraft {
    pub version: i64,
    pub modules: Vec<ModuleDraft>,
    #[serde(default)]
    pub highlights: Option<Vec<HighlightDraft>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDraft {
    pub id: ModuleId,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
    pub levels: Vec<LevelDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelDraft {
    pub id: LevelId,
    pub name: String,
    pub image: String,
    pub chapters: Vec<ChapterDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChapterDraft {
    pub id: ChapterId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub slides: Vec<SlideDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlideDraft {
    pub id: SlideId,
    pub title: String,
    pub blocks: Vec<BlockDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighlightDraft {
    pub id: String,
    pub title: String,
    pub slides: Vec<SlideDraft>,
}

impl DocumentDraft {
    /// Decode every discriminator in the tree and build the immutable document.
    ///
    /// Validation is all-or-nothing: the first failure aborts and no partial
    /// document is produced.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` for unknown block or level discriminators,
    /// missing block payloads, or (with `unique_ids`) colliding sibling ids.
    pub fn validate(self, options: &ValidationOptions) -> Result<ContentDocument, DocumentError> {
        if options.unique_ids {
            ensure_unique("module", self.modules.iter().map(|m| m.id.to_string()))?;
        }

        let modules = self
            .modules
            .into_iter()
            .map(|m| m.validate(options))
            .collect::<Result<Vec<_>, _>>()?;

        let highlights = self.highlights.unwrap_or_default();
        if options.unique_ids {
            ensure_unique("highlight", highlights.iter().map(|h| h.id.clone()))?;
        }
        let highlights = highlights
            .into_iter()
            .map(|h| h.validate(options))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ContentDocument::new(self.version, modules, highlights))
    }
}

impl ModuleDraft {
    fn validate(self, options: &ValidationOptions) -> Result<Module, DocumentError> {
        if options.unique_ids {
            ensure_unique("level", self.levels.iter().map(|l| l.id.to_string()))?;
        }
        let levels = self
            .levels
            .into_iter()
            .map(|l| l.validate(options))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Module::new(
            self.id,
            self.title,
            self.image,
            self.description,
            levels,
        ))
    }
}

impl LevelDraft {
    fn validate(self, options: &ValidationOptions) -> Result<Level, DocumentError> {
        let name = LevelName::decode(&self.name).ok_or_else(|| DocumentError::UnknownLevelType {
            level_id: self.id,
            value: self.name.clone(),
        })?;
        if options.unique_ids {
            ensure_unique("chapter", self.chapters.iter().map(|c| c.id.to_string()))?;
        }
        let chapters = self
            .chapters
            .into_iter()
            .map(|c| c.validate(options))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Level::new(self.id, name, self.image, chapters))
    }
}

impl ChapterDraft {
    fn validate(self, options: &ValidationOptions) -> Result<Chapter, DocumentError> {
        let slides = validate_slides(self.slides, options)?;
        Ok(Chapter::new(
            self.id,
            self.title,
            self.description,
            self.image,
            slides,
        ))
    }
}

impl SlideDraft {
    fn validate(self) -> Result<Slide, DocumentError> {
        let id = self.id;
        let blocks = self
            .blocks
            .into_iter()
            .map(|b| b.validate(Some(id)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Slide::new(id, self.title, blocks))
    }
}

impl HighlightDraft {
    fn validate(self, options: &ValidationOptions) -> Result<HighlightSection, DocumentError> {
        let slides = validate_slides(self.slides, options)?;
        Ok(HighlightSection::new(self.id, self.title, slides))
    }
}

fn validate_slides(
    slides: Vec<SlideDraft>,
    options: &ValidationOptions,
) -> Result<Vec<Slide>, DocumentError> {
    if options.unique_ids {
        ensure_unique("slide", slides.iter().map(|s| s.id.to_string()))?;
    }
    slides.into_iter().map(SlideDraft::validate).collect()
}

fn ensure_unique(
    scope: &'static str,
    ids: impl Iterator<Item = String>,
) -> Result<(), DocumentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            return Err(DocumentError::DuplicateId { scope, id });
        }
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": 3,
        "modules": [{
            "id": 1, "title": "Stock Markets", "image": "stockmarkets",
            "levels": [{
                "id": 10, "name": "hustler", "image": "hustler",
                "chapters": [{
                    "id": 100, "title": "Basics", "description": "What a stock is", "image": "stock",
                    "slides": [
                        {"id": 1000, "title": "Intro", "blocks": [{"type": "text", "text": "hello"}]},
                        {"id": 1001, "title": "Chart", "blocks": [{"type": "image", "images": ["slide_stock_chart"]}]}
                    ]
                }]
            }]
        }]
    }"#;

    fn draft(json: &str) -> DocumentDraft {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn builds_tree_in_document_order() {
        let doc = draft(SAMPLE).validate(&ValidationOptions::default()).unwrap();
        assert_eq!(doc.version(), 3);
        assert!(doc.highlights().is_empty());

        let module = &doc.modules()[0];
        assert_eq!(module.id(), ModuleId::new(1));
        assert_eq!(module.description(), None);

        let level = &module.levels()[0];
        assert_eq!(level.name(), LevelName::Hustler);

        let slides = level.chapters()[0].slides();
        let ids: Vec<i64> = slides.iter().map(|s| s.id().value()).collect();
        assert_eq!(ids, [1000, 1001]);
        assert_eq!(slides[1].blocks()[0].image_keys(), ["slide_stock_chart"]);
    }

    #[test]
    fn unknown_level_name_fails_whole_document() {
        let json = SAMPLE.replace("\"hustler\", \"image\": \"hustler\"", "\"legend\", \"image\": \"hustler\"");
        let err = draft(&json).validate(&ValidationOptions::default()).unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnknownLevelType {
                level_id: LevelId::new(10),
                value: "legend".into(),
            }
        );
    }

    #[test]
    fn unknown_block_type_names_the_slide() {
        let json = SAMPLE.replace("\"type\": \"text\"", "\"type\": \"quiz\"");
        let err = draft(&json).validate(&ValidationOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown block type `quiz` in slide 1000"
        );
    }

    #[test]
    fn duplicate_ids_pass_by_default_and_fail_when_strict() {
        let json = SAMPLE.replace("\"id\": 1001", "\"id\": 1000");
        assert!(draft(&json).validate(&ValidationOptions::default()).is_ok());

        let err = draft(&json).validate(&ValidationOptions::strict()).unwrap_err();
        assert_eq!(
            err,
            DocumentError::DuplicateId {
                scope: "slide",
                id: "1000".into(),
            }
        );
    }

    #[test]
    fn highlights_are_optional_and_ordered() {
        let json = r#"{
            "version": 1,
            "modules": [],
            "highlights": [
                {"id": "rally", "title": "Market rally", "slides": [
                    {"id": 1, "title": "Day one", "blocks": [{"type": "markdown", "markdown": "up"}]}
                ]},
                {"id": "news", "title": "News", "slides": []}
            ]
        }"#;
        let doc = draft(json).validate(&ValidationOptions::default()).unwrap();
        let ids: Vec<&str> = doc.highlights().iter().map(HighlightSection::id).collect();
        assert_eq!(ids, ["rally", "news"]);
    }
}
