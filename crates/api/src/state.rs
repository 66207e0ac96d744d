use std::sync::Arc;

use timeslot_db::repositories::Repositories;

use crate::config::ServerConfig;
use crate::services::Services;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks).
    pub pool: timeslot_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Auth, list and item services.
    pub services: Arc<Services>,
}

impl AppState {
    /// Wire the PostgreSQL stores and services over `pool`.
    pub fn new(pool: timeslot_db::DbPool, config: Arc<ServerConfig>) -> Self {
        let repos = Repositories::postgres(pool.clone());
        let services = Arc::new(Services::new(repos, &config));
        Self {
            pool,
            config,
            services,
        }
    }
}
