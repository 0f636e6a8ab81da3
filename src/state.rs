use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::{AppConfig, SessionConfig};
use crate::meals::repo::{MealRepo, MemoryMealRepo, PgMealRepo};
use crate::session::repo::{MemoryOwnerRepo, OwnerRepo, PgOwnerRepo};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub owners: Arc<dyn OwnerRepo>,
    pub meals: Arc<dyn MealRepo>,
}

impl AppState {
    /// Connects the pool and runs the embedded migrations.
    pub async fn init(config: AppConfig) -> anyhow::Result<(Self, PgPool)> {
        let db = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;

        Ok((Self::from_pool(db.clone(), Arc::new(config)), db))
    }

    pub fn from_pool(db: PgPool, config: Arc<AppConfig>) -> Self {
        Self {
            config,
            owners: Arc::new(PgOwnerRepo::new(db.clone())),
            meals: Arc::new(PgMealRepo::new(db)),
        }
    }

    /// Test state backed by in-process tables; `main` always goes through `init`.
    pub fn in_memory() -> Self {
        let config = Arc::new(AppConfig {
            database_url: "memory".into(),
            host: "127.0.0.1".into(),
            port: 0,
            db_max_connections: 1,
            request_timeout_secs: 30,
            session: SessionConfig {
                cookie_secure: false,
            },
        });
        Self {
            config,
            owners: Arc::new(MemoryOwnerRepo::default()),
            meals: Arc::new(MemoryMealRepo::default()),
        }
    }
}
