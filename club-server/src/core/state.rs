use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{DbService, seed};

/// Server state: shared handles for every service
///
/// Cloning is shallow: the pool and the JWT service are reference
/// counted, so handlers and background tasks each hold their own copy.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub db: SqlitePool,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize the server state: data directory, database (with
    /// migrations and first-run seed), and JWT service.
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened or seeded; without a
    /// store there is nothing the server could do.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_data_dir()
            .expect("Failed to create data directory");

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let db = db_service.pool;

        seed::seed_defaults(&db)
            .await
            .expect("Failed to seed database defaults");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config: config.clone(),
            db,
            jwt_service,
        }
    }

    /// Database pool handle
    pub fn get_db(&self) -> SqlitePool {
        self.db.clone()
    }

    /// JWT service handle
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
