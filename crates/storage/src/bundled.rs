use async_trait::async_trait;

use crate::repository::{ContentSource, SourceError};

/// The curriculum document shipped inside the binary.
pub const BUNDLED_CONTENT: &str = include_str!("../assets/content.json");

#[derive(Debug, Clone, Copy, Default)]
pub struct BundledContentSource;

#[async_trait]
impl ContentSource for BundledContentSource {
    async fn read(&self) -> Result<String, SourceError> {
        Ok(BUNDLED_CONTENT.to_owned())
    }

    fn describe(&self) -> String {
        "bundled:content.json".into()
    }
}
