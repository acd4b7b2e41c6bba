//! Shared application state.

use std::sync::Arc;

use clientele_core::error::ClienteleError;
use clientele_db::DbManager;
use clientele_db::repository::SurrealCustomerRepository;
use surrealdb::engine::any::Any;

use crate::error::ApiError;

/// State handed to every handler. Owns the process's database manager.
#[derive(Clone)]
pub struct AppState {
    db: Arc<DbManager>,
}

impl AppState {
    pub fn new(db: DbManager) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn db(&self) -> &DbManager {
        &self.db
    }

    /// The customer store over a live connection, connecting first if
    /// needed.
    pub(crate) async fn customers(&self) -> Result<SurrealCustomerRepository<Any>, ApiError> {
        let db = self
            .db
            .ensure_connected()
            .await
            .map_err(ClienteleError::from)?;
        Ok(SurrealCustomerRepository::new(db))
    }
}
