use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::Recommender;

/// Shared application state
///
/// The recommender is an immutable snapshot; a dataset reload builds a new one
/// and swaps it in under the write lock.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<RwLock<Recommender>>,
    pub dataset_path: PathBuf,
    /// Count used when a request does not specify `n`
    pub default_count: usize,
}

impl AppState {
    pub fn new(recommender: Recommender, dataset_path: PathBuf, default_count: usize) -> Self {
        Self {
            recommender: Arc::new(RwLock::new(recommender)),
            dataset_path,
            default_count,
        }
    }
}
