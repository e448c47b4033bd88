use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use study_core::model::SlideId;
use thiserror::Error;

use crate::bundled::BundledContentSource;
use crate::file::FileContentSource;

/// Errors surfaced while reading the curriculum resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceError {
    #[error("content resource not found: {0}")]
    Missing(String),

    #[error("failed to read content resource {location}: {message}")]
    Io { location: String, message: String },

    #[error("content resource is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("content resource unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the curriculum document text.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Read the whole resource as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the resource is missing, unreadable, or not UTF-8.
    async fn read(&self) -> Result<String, SourceError>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// Per-slide completion flags owned by the caller.
///
/// The content engine only reads this; persisting completion happens elsewhere.
pub trait SlideCompletion: Send + Sync {
    fn is_slide_complete(&self, slide_id: SlideId) -> bool;
}

/// Completion source that knows nothing: every slide is incomplete.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompletion;

impl SlideCompletion for NoCompletion {
    fn is_slide_complete(&self, _slide_id: SlideId) -> bool {
        false
    }
}

/// Completion flags held in memory, for tests and one-shot tools.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompletion {
    completed: Arc<Mutex<HashSet<SlideId>>>,
}

impl InMemoryCompletion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(ids: impl IntoIterator<Item = SlideId>) -> Self {
        let completion = Self::new();
        for id in ids {
            completion.mark_complete(id);
        }
        completion
    }

    pub fn mark_complete(&self, slide_id: SlideId) {
        self.completed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slide_id);
    }

    pub fn clear(&self) {
        self.completed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl SlideCompletion for InMemoryCompletion {
    fn is_slide_complete(&self, slide_id: SlideId) -> bool {
        self.completed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&slide_id)
    }
}

/// Content held in memory. Counts reads so callers can observe memoization.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentSource {
    text: Arc<Mutex<Option<String>>>,
    reads: Arc<AtomicUsize>,
}

impl InMemoryContentSource {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(Mutex::new(Some(text.into()))),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose reads fail with `SourceError::Unavailable` until text is set.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.into());
    }

    pub fn set_unavailable(&self) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Number of `read` calls so far, successful or not.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for InMemoryContentSource {
    async fn read(&self) -> Result<String, SourceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| SourceError::Unavailable(self.describe()))
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

/// Aggregates the content source and completion capability behind trait
/// objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub content: Arc<dyn ContentSource>,
    pub completion: Arc<dyn SlideCompletion>,
}

impl Storage {
    /// The curriculum compiled into the binary, with no completion state.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            content: Arc::new(BundledContentSource),
            completion: Arc::new(NoCompletion),
        }
    }

    #[must_use]
    pub fn file(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            content: Arc::new(FileContentSource::new(path)),
            completion: Arc::new(NoCompletion),
        }
    }

    #[must_use]
    pub fn in_memory(text: impl Into<String>) -> Self {
        Self {
            content: Arc::new(InMemoryContentSource::new(text)),
            completion: Arc::new(InMemoryCompletion::new()),
        }
    }

    #[must_use]
    pub fn with_completion(mut self, completion: Arc<dyn SlideCompletion>) -> Self {
        self.completion = completion;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_source_counts_reads() {
        let source = InMemoryContentSource::new("{}");
        assert_eq!(source.read().await.unwrap(), "{}");
        assert_eq!(source.read().await.unwrap(), "{}");
        assert_eq!(source.reads(), 2);
    }

    #[tokio::test]
    async fn unavailable_source_recovers_once_text_is_set() {
        let source = InMemoryContentSource::unavailable();
        let err = source.read().await.unwrap_err();
        assert_eq!(err, SourceError::Unavailable("memory".into()));

        source.set_text("{\"version\":1}");
        assert!(source.read().await.is_ok());
        assert_eq!(source.reads(), 2);
    }

    #[tokio::test]
    async fn poisoned_source_lock_still_serves_text() {
        let source = InMemoryContentSource::new("{}");
        let shared = source.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.text.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(source.text.is_poisoned());
        assert_eq!(source.read().await.unwrap(), "{}");
        source.set_unavailable();
        assert_eq!(
            source.read().await.unwrap_err(),
            SourceError::Unavailable("memory".into())
        );
    }

    #[test]
    fn stub_completion_reports_everything_incomplete() {
        assert!(!NoCompletion.is_slide_complete(SlideId::new(1)));
    }

    #[test]
    fn in_memory_completion_tracks_marked_slides() {
        let completion = InMemoryCompletion::with_completed([SlideId::new(1), SlideId::new(3)]);
        assert!(completion.is_slide_complete(SlideId::new(1)));
        assert!(!completion.is_slide_complete(SlideId::new(2)));

        completion.clear();
        assert!(!completion.is_slide_complete(SlideId::new(1)));
    }
}
