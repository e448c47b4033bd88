//! Image-key resolution for curriculum artwork.
//!
//! Content refers to pictures by opaque keys. Presentation layers resolve a
//! key to a handle of their own and fall back to a placeholder for anything
//! they do not know.

use std::collections::HashMap;

use tracing::warn;

/// Presentation-side reference to a picture, e.g. an asset path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(String);

impl ImageHandle {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub trait ImageResolver: Send + Sync {
    /// Resolve a key, never failing. Blank or unknown keys yield a placeholder.
    fn resolve(&self, key: Option<&str>) -> ImageHandle;
}

/// Canonical form of an image key: trimmed, lowercase, `-` and spaces as `_`.
#[must_use]
pub fn normalize_image_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Static key table with a placeholder fallback.
#[derive(Debug, Clone)]
pub struct ImageTable {
    entries: HashMap<String, ImageHandle>,
    placeholder: ImageHandle,
}

impl ImageTable {
    #[must_use]
    pub fn new(placeholder: ImageHandle) -> Self {
        Self {
            entries: HashMap::new(),
            placeholder,
        }
    }

    /// Register `key` (normalized) as an alias for `handle`.
    #[must_use]
    pub fn with_entry(mut self, key: &str, handle: impl Into<String>) -> Self {
        self.entries
            .insert(normalize_image_key(key), ImageHandle::new(handle));
        self
    }

    /// Keys used by the bundled curriculum.
    #[must_use]
    pub fn bundled() -> Self {
        const ENTRIES: &[(&str, &str)] = &[
            // modules
            ("stockmarkets", "images/stockmarkets.png"),
            ("fundamental", "images/fundamental.png"),
            ("techicals", "images/technicals.png"),
            ("personalfinances", "images/personalfinances.png"),
            ("comodity", "images/commodity.png"),
            ("futureandoptions", "images/futureandoptions.png"),
            // levels
            ("hustler", "images/hustler.png"),
            ("mastermind", "images/mastermind.png"),
            ("unstoppable", "images/unstoppable.png"),
            // chapters and slides
            ("stock", "images/stock.png"),
            ("balance_sheet", "images/balance_sheet.png"),
            ("slide_stock_intro", "images/stock.png"),
            ("slide_stock_chart", "images/stock.png"),
            ("market_rally_1", "images/stock.png"),
            ("market_rally_2", "images/stock.png"),
        ];

        ENTRIES.iter().fold(
            Self::new(ImageHandle::new("images/placeholder.png")),
            |table, (key, handle)| table.with_entry(key, *handle),
        )
    }

    #[must_use]
    pub fn placeholder(&self) -> &ImageHandle {
        &self.placeholder
    }
}

impl ImageResolver for ImageTable {
    fn resolve(&self, key: Option<&str>) -> ImageHandle {
        let Some(raw) = key.filter(|k| !k.trim().is_empty()) else {
            warn!("image key is missing or blank");
            return self.placeholder.clone();
        };

        match self.entries.get(&normalize_image_key(raw)) {
            Some(handle) => handle.clone(),
            None => {
                warn!(key = raw, "unknown image key");
                self.placeholder.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_separators_and_whitespace() {
        assert_eq!(normalize_image_key("  Balance-Sheet "), "balance_sheet");
        assert_eq!(normalize_image_key("Market Rally 1"), "market_rally_1");
    }

    #[test]
    fn resolves_known_keys_in_any_spelling() {
        let table = ImageTable::bundled();
        assert_eq!(
            table.resolve(Some("Balance Sheet")).as_str(),
            "images/balance_sheet.png"
        );
        assert_eq!(table.resolve(Some("HUSTLER")).as_str(), "images/hustler.png");
    }

    #[test]
    fn falls_back_to_placeholder() {
        let table = ImageTable::bundled();
        assert_eq!(&table.resolve(None), table.placeholder());
        assert_eq!(&table.resolve(Some("   ")), table.placeholder());
        assert_eq!(&table.resolve(Some("unicorn")), table.placeholder());
    }
}
