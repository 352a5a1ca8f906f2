use std::sync::Arc;

use crate::infra::store::MemoryStore;

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<MemoryStore>,
}

impl ApiState {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
