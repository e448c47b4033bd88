use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::repository::{ContentSource, SourceError};

/// Reads the curriculum document from a file on disk.
#[derive(Debug, Clone)]
pub struct FileContentSource {
    path: PathBuf,
}

impl FileContentSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    async fn read(&self) -> Result<String, SourceError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SourceError::Missing(self.describe())
            } else {
                SourceError::Io {
                    location: self.describe(),
                    message: e.to_string(),
                }
            }
        })?;

        let text = String::from_utf8(bytes).map_err(|_| SourceError::Encoding(self.describe()))?;
        // Editors on some platforms prepend a byte-order mark.
        Ok(match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_owned(),
            None => text,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_utf8_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"version\":2}}").unwrap();

        let source = FileContentSource::new(file.path());
        assert_eq!(source.read().await.unwrap(), "{\"version\":2}");
    }

    #[tokio::test]
    async fn strips_byte_order_mark() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("\u{feff}{}".as_bytes()).unwrap();

        let source = FileContentSource::new(file.path());
        assert_eq!(source.read().await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileContentSource::new(dir.path().join("content.json"));
        let err = source.read().await.unwrap_err();
        assert!(matches!(err, SourceError::Missing(_)));
    }

    #[tokio::test]
    async fn invalid_utf8_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x7b, 0xff, 0xfe, 0x7d]).unwrap();

        let source = FileContentSource::new(file.path());
        let err = source.read().await.unwrap_err();
        assert!(matches!(err, SourceError::Encoding(_)));
    }
}
