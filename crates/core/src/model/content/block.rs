use std::fmt;

use serde::Deserialize;

use crate::model::content::DocumentError;
use crate::model::ids::SlideId;

//
// ─── BLOCK TYPES ───────────────────────────────────────────────────────────────
//

/// One typed unit of slide content.
///
/// The set of variants is closed: renderers match exhaustively and an
/// unrecognized discriminator never survives loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text { text: String },
    Markdown { markdown: String },
    Image { images: Vec<String> },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Discriminator values accepted in the `type` field of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Text,
    Markdown,
    Image,
    Table,
}

impl BlockKind {
    /// Decodes a raw discriminator, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TEXT" => Some(Self::Text),
            "MARKDOWN" => Some(Self::Markdown),
            "IMAGE" => Some(Self::Image),
            "TABLE" => Some(Self::Table),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Image => "image",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Block {
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Text { .. } => BlockKind::Text,
            Block::Markdown { .. } => BlockKind::Markdown,
            Block::Image { .. } => BlockKind::Image,
            Block::Table { .. } => BlockKind::Table,
        }
    }

    /// Readable text carried by the block, if it is a text or markdown block.
    #[must_use]
    pub fn as_prose(&self) -> Option<&str> {
        match self {
            Block::Text { text } => Some(text),
            Block::Markdown { markdown } => Some(markdown),
            _ => None,
        }
    }

    /// Image keys carried by the block, empty for non-image blocks.
    #[must_use]
    pub fn image_keys(&self) -> &[String] {
        match self {
            Block::Image { images } => images,
            _ => &[],
        }
    }
}

//
// ─── DRAFT (unvalidated input) ─────────────────────────────────────────────────
//

/// A block as it appears in the curriculum JSON, before its discriminator is
/// decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlockDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
    pub markdown: Option<String>,
    pub images: Option<Vec<String>>,
    pub headers: Option<Vec<String>>,
    pub rows: Option<Vec<Vec<String>>>,
}

impl BlockDraft {
    /// Decode the discriminator and keep only the fields of the chosen variant.
    ///
    /// `slide_id` is carried into errors so a failed load points at the
    /// offending slide.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::UnknownBlockType` for an unrecognized `type`,
    /// or `DocumentError::MissingBlockField` if the variant's payload is absent.
    pub fn validate(self, slide_id: Option<SlideId>) -> Result<Block, DocumentError> {
        let Some(kind) = BlockKind::decode(&self.kind) else {
            return Err(DocumentError::UnknownBlockType {
                slide_id,
                value: self.kind,
            });
        };

        let missing = |field: &'static str| DocumentError::MissingBlockField {
            slide_id,
            kind,
            field,
        };

        let block = match kind {
            BlockKind::Text => Block::Text {
                text: self.text.ok_or_else(|| missing("text"))?,
            },
            BlockKind::Markdown => Block::Markdown {
                markdown: self.markdown.ok_or_else(|| missing("markdown"))?,
            },
            BlockKind::Image => Block::Image {
                images: self.images.ok_or_else(|| missing("images"))?,
            },
            BlockKind::Table => Block::Table {
                headers: self.headers.ok_or_else(|| missing("headers"))?,
                rows: self.rows.ok_or_else(|| missing("rows"))?,
            },
        };
        Ok(block)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<Block, DocumentError> {
        let draft: BlockDraft = serde_json::from_str(json).unwrap();
        draft.validate(Some(SlideId::new(1)))
    }

    #[test]
    fn text_block_keeps_text() {
        let block = decode(r#"{"type":"text","text":"Stocks are shares."}"#).unwrap();
        assert_eq!(
            block,
            Block::Text {
                text: "Stocks are shares.".into()
            }
        );
        assert_eq!(block.as_prose(), Some("Stocks are shares."));
    }

    #[test]
    fn markdown_block_keeps_markdown() {
        let block = decode(r#"{"type":"Markdown","markdown":"**bold**"}"#).unwrap();
        assert_eq!(
            block,
            Block::Markdown {
                markdown: "**bold**".into()
            }
        );
    }

    #[test]
    fn image_block_keeps_key_order() {
        let block = decode(r#"{"type":"image","images":["b","a","c"]}"#).unwrap();
        assert_eq!(block.image_keys(), ["b", "a", "c"]);
    }

    #[test]
    fn table_block_keeps_headers_and_rows_in_order() {
        let block = decode(
            r#"{"type":"TABLE","headers":["A","B"],"rows":[["1","2"],["3","4"]]}"#,
        )
        .unwrap();
        assert_eq!(
            block,
            Block::Table {
                headers: vec!["A".into(), "B".into()],
                rows: vec![
                    vec!["1".into(), "2".into()],
                    vec!["3".into(), "4".into()]
                ],
            }
        );
    }

    #[test]
    fn discriminator_is_trimmed_and_case_insensitive() {
        assert_eq!(BlockKind::decode("  tExT "), Some(BlockKind::Text));
        assert_eq!(BlockKind::decode("table"), Some(BlockKind::Table));
        assert_eq!(BlockKind::decode("video"), None);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = decode(r#"{"type":"video","url":"x"}"#).unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnknownBlockType {
                slide_id: Some(SlideId::new(1)),
                value: "video".into(),
            }
        );
    }

    #[test]
    fn missing_payload_is_rejected() {
        let err = decode(r#"{"type":"table","headers":["A"]}"#).unwrap_err();
        assert_eq!(
            err,
            DocumentError::MissingBlockField {
                slide_id: Some(SlideId::new(1)),
                kind: BlockKind::Table,
                field: "rows",
            }
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let block = decode(r#"{"type":"text","text":"hi","images":["x"]}"#).unwrap();
        assert_eq!(block.kind(), BlockKind::Text);
    }
}
