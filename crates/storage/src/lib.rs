#![forbid(unsafe_code)]

pub mod bundled;
pub mod file;
pub mod repository;

pub use bundled::{BUNDLED_CONTENT, BundledContentSource};
pub use file::FileContentSource;
pub use repository::{
    ContentSource, InMemoryCompletion, InMemoryContentSource, NoCompletion, SlideCompletion,
    SourceError, Storage,
};
