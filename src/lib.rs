pub mod background;
pub mod commands;
pub mod config;
pub mod espn;
pub mod fixtures;
pub mod formatting;
pub mod layout_constants;
pub mod provider;
pub mod store;
pub mod tui;
pub mod types;

use std::sync::Arc;
use std::time::SystemTime;
use store::SelectionStore;
use tokio::sync::RwLock;

/// State shared between the TUI and the background refresh task.
///
/// The store owns the selection; `last_refresh` and `error_message` are
/// written by whichever component last fetched.
pub struct SharedData {
    pub store: SelectionStore,
    pub last_refresh: Option<SystemTime>,
    pub error_message: Option<String>,
}

impl SharedData {
    pub fn new(store: SelectionStore) -> Self {
        SharedData {
            store,
            last_refresh: None,
            error_message: None,
        }
    }
}

pub type SharedDataHandle = Arc<RwLock<SharedData>>;

/// Wrap a selection store into the handle the TUI and background task share.
pub fn shared_handle(store: SelectionStore) -> SharedDataHandle {
    Arc::new(RwLock::new(SharedData::new(store)))
}
