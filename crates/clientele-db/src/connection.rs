//! SurrealDB connection management.
//!
//! [`DbManager`] owns the single connection a process uses. It is
//! created at startup, handed to whoever needs the database, and opens
//! the connection lazily on the first [`DbManager::ensure_connected`].

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use tracing::{error, info};

use crate::error::DbError;
use crate::schema::run_migrations;

/// Default bound on a connection attempt.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Connection string, e.g. `ws://127.0.0.1:8000` or `mem://`.
    pub url: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Root username. Sign-in is skipped unless both credentials are set.
    pub username: Option<String>,
    /// Root password.
    pub password: Option<String>,
    /// Upper bound on opening the connection.
    pub connect_timeout: Duration,
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            namespace: "clientele".into(),
            database: "main".into(),
            username: None,
            password: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Why a connection attempt failed. Cloneable so that one failed
/// attempt can be reported to every caller that awaited it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectError {
    #[error("{0}")]
    Surreal(Arc<surrealdb::Error>),

    #[error("schema setup failed: {0}")]
    Migration(String),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

type ConnectFuture = BoxFuture<'static, Result<Surreal<Any>, ConnectError>>;
type PendingConnection = Shared<ConnectFuture>;

/// Starts one connection attempt.
type Opener = Arc<dyn Fn(Arc<DbConfig>) -> ConnectFuture + Send + Sync>;

enum ConnectionState {
    Idle,
    Connecting(PendingConnection),
    Ready(Surreal<Any>),
}

/// Manages the process-wide connection to SurrealDB.
pub struct DbManager {
    config: Arc<DbConfig>,
    state: Mutex<ConnectionState>,
    opener: Opener,
}

impl DbManager {
    pub fn new(config: DbConfig) -> Self {
        Self::with_opener(config, Arc::new(|config: Arc<DbConfig>| open(config).boxed()))
    }

    fn with_opener(config: DbConfig, opener: Opener) -> Self {
        Self {
            config: Arc::new(config),
            state: Mutex::new(ConnectionState::Idle),
            opener,
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// True once a connection attempt has succeeded.
    pub fn is_connected(&self) -> bool {
        matches!(*self.state.lock(), ConnectionState::Ready(_))
    }

    /// Return the connected client, opening the connection first if
    /// needed.
    ///
    /// Safe to call before every operation. Callers arriving while an
    /// attempt is in flight await that same attempt. A failed attempt
    /// is reported to all of them and is not remembered: the next call
    /// starts over.
    pub async fn ensure_connected(&self) -> Result<Surreal<Any>, DbError> {
        let pending = {
            let mut state = self.state.lock();
            match &*state {
                ConnectionState::Ready(db) => return Ok(db.clone()),
                ConnectionState::Connecting(pending) => pending.clone(),
                ConnectionState::Idle => {
                    let pending = (self.opener)(Arc::clone(&self.config)).shared();
                    *state = ConnectionState::Connecting(pending.clone());
                    pending
                }
            }
        };

        let outcome = pending.clone().await;

        let mut state = self.state.lock();
        let owns_state = matches!(
            &*state,
            ConnectionState::Connecting(current) if current.ptr_eq(&pending)
        );
        if owns_state {
            *state = match &outcome {
                Ok(db) => ConnectionState::Ready(db.clone()),
                Err(_) => ConnectionState::Idle,
            };
        }

        Ok(outcome?)
    }
}

/// Connect, authenticate, select namespace/database and bring the
/// schema up to date.
async fn open(config: Arc<DbConfig>) -> Result<Surreal<Any>, ConnectError> {
    info!(
        url = %config.url,
        namespace = %config.namespace,
        database = %config.database,
        "Connecting to SurrealDB"
    );

    let attempt = async {
        let db = any::connect(config.url.as_str()).await?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            db.signin(Root {
                username: username.clone(),
                password: password.clone(),
            })
            .await?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        Ok::<_, surrealdb::Error>(db)
    };

    let db = match tokio::time::timeout(config.connect_timeout, attempt).await {
        Ok(Ok(db)) => db,
        Ok(Err(e)) => {
            error!(url = %config.url, error = %e, "SurrealDB connection failed");
            return Err(ConnectError::Surreal(Arc::new(e)));
        }
        Err(_) => {
            error!(
                url = %config.url,
                timeout_ms = config.connect_timeout.as_millis() as u64,
                "SurrealDB connection timed out"
            );
            return Err(ConnectError::TimedOut(config.connect_timeout));
        }
    };

    run_migrations(&db).await.map_err(|e| {
        error!(error = %e, "Schema migration failed");
        ConnectError::Migration(e.to_string())
    })?;

    info!("Successfully connected to SurrealDB");

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn config_defaults() {
        let config = DbConfig::new("mem://");
        assert_eq!(config.url, "mem://");
        assert_eq!(config.namespace, "clientele");
        assert_eq!(config.database, "main");
        assert!(config.username.is_none());
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn new_manager_starts_disconnected() {
        let manager = DbManager::new(DbConfig::new("mem://"));
        assert!(!manager.is_connected());
    }

    /// Fails the first attempt, then opens a real in-memory database.
    fn flaky_opener(attempts: Arc<AtomicUsize>) -> Opener {
        Arc::new(move |config: Arc<DbConfig>| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    return Err(ConnectError::TimedOut(config.connect_timeout));
                }
                open(config).await
            }
            .boxed()
        })
    }

    #[tokio::test]
    async fn retry_after_failure_opens_a_new_connection() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let manager =
            DbManager::with_opener(DbConfig::new("mem://"), flaky_opener(Arc::clone(&attempts)));

        let (a, b) = tokio::join!(manager.ensure_connected(), manager.ensure_connected());
        assert!(matches!(a, Err(DbError::Connection(ConnectError::TimedOut(_)))));
        assert!(matches!(b, Err(DbError::Connection(ConnectError::TimedOut(_)))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(!manager.is_connected());

        manager.ensure_connected().await.expect("retry connects");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert!(manager.is_connected());

        manager.ensure_connected().await.expect("reuses the connection");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
