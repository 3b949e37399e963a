use std::sync::Arc;

use kanban_service::KanbanService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kanban_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Board operations, attributed to the interactive user.
    pub service: KanbanService,
}

impl AppState {
    pub fn new(pool: kanban_db::DbPool, config: ServerConfig) -> Self {
        Self {
            service: KanbanService::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
