//! Application state shared by all handlers.

use s3bridge_storage::ObjectStorage;
use std::sync::Arc;

/// Handlers hold no mutable state of their own; the storage client is the only shared
/// collaborator and is safe for concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn ObjectStorage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Arc<Self> {
        Arc::new(Self { storage })
    }
}
