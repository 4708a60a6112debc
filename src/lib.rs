pub mod config;
pub mod rest;
pub mod store;
pub mod tasks;

use std::sync::Arc;

use config::TaskdConfig;
use tasks::manager::TaskManager;

/// Shared application state passed to every request handler.
///
/// Constructed once in `main` and injected into the router via axum
/// `State`. Handlers never touch the persisted file directly; all access
/// goes through `tasks`, which owns the store.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<TaskdConfig>,
    pub tasks: Arc<TaskManager>,
    pub started_at: std::time::Instant,
}
