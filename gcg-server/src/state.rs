use std::sync::Arc;

use gcg_core::repo::DocumentRepo;
use gcg_core::uploads::UploadStore;

use crate::events::EventBus;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn DocumentRepo>,
    pub uploads: Arc<UploadStore>,
    pub events: EventBus,
}

impl AppState {
    pub fn new(repo: Arc<dyn DocumentRepo>, uploads: Arc<UploadStore>) -> Self {
        Self {
            repo,
            uploads,
            events: EventBus::default(),
        }
    }
}
