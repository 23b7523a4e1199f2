use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use error::Result;

const CONNECT_ATTEMPTS: u32 = 3;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Handle to the connection pool, shared across request handlers.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to Postgres with bounded retry on initial connect.
    /// Individual queries are never retried.
    pub async fn new(database_url: &str) -> Result<Self> {
        let mut attempt = 1;
        let pool = loop {
            let connect = PgPoolOptions::new()
                .max_connections(10)
                .acquire_timeout(Duration::from_secs(5))
                .connect(database_url)
                .await;

            match connect {
                Ok(pool) => break pool,
                Err(e) if attempt < CONNECT_ATTEMPTS => {
                    tracing::warn!(
                        "Database connection attempt {attempt}/{CONNECT_ATTEMPTS} failed: {e}"
                    );
                    attempt += 1;
                    tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                }
                Err(e) => return Err(e.into()),
            }
        };

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
