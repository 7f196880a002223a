use std::sync::Arc;

use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub upload_max_bytes: usize,
}

impl AppState {
    pub fn new(storage: StorageConfig, upload_max_bytes: usize) -> Self {
        Self {
            storage: Arc::new(storage),
            upload_max_bytes,
        }
    }
}
