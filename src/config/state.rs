// Application state module
// Shared between every connection task for the process lifetime

use std::sync::Arc;

use super::types::Config;
use crate::store::MessageStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: Arc<MessageStore>,
}

impl AppState {
    pub const fn new(config: Config, store: Arc<MessageStore>) -> Self {
        Self { config, store }
    }
}
