//! Shared application state
//!
//! Estado compartido de la aplicación que se pasa a través del router de
//! Axum. Se materializa una vez al arrancar; el usuario actuante NO vive
//! acá sino en las extensions de cada request.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::storage::StorageGateway;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub storage: Arc<dyn StorageGateway>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        storage: Arc<dyn StorageGateway>,
    ) -> Self {
        Self {
            pool,
            config,
            storage,
        }
    }
}
