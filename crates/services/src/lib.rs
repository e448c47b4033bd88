#![forbid(unsafe_code)]

pub mod app_services;
pub mod cards;
pub mod content;
pub mod error;
pub mod images;
pub mod progress;

pub use app_services::AppServices;
pub use cards::{CardItem, DEFAULT_CARD_DESCRIPTION, highlight_cards, slide_card};
pub use content::{ContentLoader, ContentStore, parse_block, parse_document};
pub use error::{ContentError, ContentLoadError, ParseError};
pub use images::{ImageHandle, ImageResolver, ImageTable, normalize_image_key};
pub use progress::{LevelSummary, ProgressService};
