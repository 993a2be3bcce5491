//! MySQL implementation of the persistence layer.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, MySql, MySqlPool};

use super::PostStore;
use crate::config::DatabaseConfig;
use crate::domain::{Post, clamp_limit};
use crate::error::BoardError;

const CREATE_POSTS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS posts (
  id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
  message TEXT NOT NULL,
  image_key VARCHAR(1024) NULL,
  created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci";

/// MySQL-backed persistence layer using a bounded `sqlx::MySqlPool`.
///
/// Every checkout pings the connection first and replaces it if it is
/// dead. When all connections are checked out, callers wait up to the
/// configured acquire timeout.
#[derive(Debug, Clone)]
pub struct MySqlPersistence {
    pool: MySqlPool,
}

impl MySqlPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Opens the pool described by `config`. At least one connection is
    /// established before this returns.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError::PersistenceError`] if the server cannot be
    /// reached or rejects the login.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, BoardError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name)
            .charset("utf8mb4")
            .collation("utf8mb4_unicode_ci");

        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .test_before_acquire(true)
            .connect_with(options)
            .await?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            pool_size = config.pool_size,
            "database pool ready"
        );
        Ok(Self::new(pool))
    }

    /// Checks out a live connection. It returns to the pool when dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError::PersistenceError`] if no connection becomes
    /// available within the acquire timeout.
    pub async fn acquire_connection(&self) -> Result<PoolConnection<MySql>, BoardError> {
        Ok(self.pool.acquire().await?)
    }

    /// Sends a round-trip ping on a pooled connection.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError::PersistenceError`] if the server does not answer.
    pub async fn ping(&self) -> Result<(), BoardError> {
        let mut conn = self.acquire_connection().await?;
        conn.ping().await?;
        Ok(())
    }

    /// Closes every pooled connection, waiting for checked-out ones to
    /// come back.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

#[async_trait]
impl PostStore for MySqlPersistence {
    async fn ensure_schema(&self) -> Result<(), BoardError> {
        let mut conn = self.acquire_connection().await?;
        sqlx::query(CREATE_POSTS_TABLE).execute(&mut *conn).await?;
        tracing::info!("posts table ready");
        Ok(())
    }

    async fn insert_post(
        &self,
        message: &str,
        image_key: Option<&str>,
    ) -> Result<Post, BoardError> {
        let mut conn = self.acquire_connection().await?;

        let result = sqlx::query("INSERT INTO posts (message, image_key) VALUES (?, ?)")
            .bind(message)
            .bind(image_key)
            .execute(&mut *conn)
            .await?;
        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| BoardError::Internal(format!("post id out of range: {e}")))?;

        let post = sqlx::query_as::<_, Post>(
            "SELECT id, message, image_key, created_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(post)
    }

    async fn list_posts(&self, limit: i64) -> Result<Vec<Post>, BoardError> {
        let mut conn = self.acquire_connection().await?;

        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, message, image_key, created_at FROM posts \
             ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(clamp_limit(limit))
        .fetch_all(&mut *conn)
        .await?;

        Ok(posts)
    }
}
