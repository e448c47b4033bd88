mod loader;
mod store;

pub use loader::{ContentLoader, parse_block, parse_document};
pub use store::ContentStore;
