use std::sync::Arc;

use storage::Storage;
use study_core::model::ValidationOptions;

use crate::content::{ContentLoader, ContentStore};
use crate::images::{ImageResolver, ImageTable};
use crate::progress::ProgressService;

/// Assembles app-facing services around one shared content store.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<ContentStore>,
    progress: Arc<ProgressService>,
    images: Arc<dyn ImageResolver>,
}

impl AppServices {
    /// Build services over the given storage. Nothing is loaded until the
    /// first content access.
    #[must_use]
    pub fn new(storage: Storage, options: ValidationOptions) -> Self {
        let loader = ContentLoader::new(Arc::clone(&storage.content), options);
        let store = Arc::new(ContentStore::new(loader));
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&store),
            Arc::clone(&storage.completion),
        ));
        Self {
            store,
            progress,
            images: Arc::new(ImageTable::bundled()),
        }
    }

    #[must_use]
    pub fn with_images(mut self, images: Arc<dyn ImageResolver>) -> Self {
        self.images = images;
        self
    }

    #[must_use]
    pub fn content(&self) -> Arc<ContentStore> {
        Arc::clone(&self.store)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn images(&self) -> Arc<dyn ImageResolver> {
        Arc::clone(&self.images)
    }
}
