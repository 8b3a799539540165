//! SQLite database
//!
//! Owns the connection pool shared by the knowledge base and the ticket
//! store, applies the embedded schema on open and seeds the knowledge base.

mod seed;

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

pub use seed::{SeedArticle, SEED_ARTICLES};

/// Connection pool for the support database
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database at `db_path`, run migrations
    /// and seed the knowledge base when it is empty
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file, optionally `sqlite:`-prefixed
    ///
    /// # Errors
    /// * `AppError::Internal` if the directory, connection or migration fails
    pub async fn connect(db_path: &str) -> Result<Self, AppError> {
        let file_path = db_path.strip_prefix("sqlite:").unwrap_or(db_path);
        if let Some(parent) = PathBuf::from(file_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("Failed to create db directory: {}", e))
                })?;
            }
        }

        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid database path: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to connect to database: {}", e))
            })?;

        info!(path = %db_path, "Connected to SQLite database");

        let db = Self { pool };
        db.run_migrations().await?;
        db.seed_knowledge_base().await?;

        Ok(db)
    }

    /// Apply the embedded schema; every statement is idempotent
    async fn run_migrations(&self) -> Result<(), AppError> {
        debug!("Running database migrations");

        let migration_sql = include_str!("../../migrations/001_create_support_tables.sql");

        for statement in split_statements(migration_sql) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::Internal(anyhow::anyhow!(
                        "Migration failed: {} - Statement: {}",
                        e,
                        statement.chars().take(100).collect::<String>()
                    ))
                })?;
        }

        info!("Database migrations completed");
        Ok(())
    }

    /// Insert the standard articles when the knowledge base has none
    ///
    /// Returns how many articles were inserted.
    pub async fn seed_knowledge_base(&self) -> Result<usize, AppError> {
        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kb")
            .fetch_one(&self.pool)
            .await?;
        if existing > 0 {
            debug!(articles = existing, "Knowledge base already populated");
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for article in SEED_ARTICLES {
            sqlx::query("INSERT INTO kb (title, content, category, tags) VALUES (?, ?, ?, ?)")
                .bind(article.title)
                .bind(article.content)
                .bind(article.category)
                .bind(article.tags)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!(articles = SEED_ARTICLES.len(), "Seeded knowledge base");
        Ok(SEED_ARTICLES.len())
    }

    /// Round-trip a trivial query
    ///
    /// # Errors
    /// * `AppError::ServiceUnavailable` if the database does not answer
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::ServiceUnavailable(format!("database unreachable: {}", e)))
    }

    /// The underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Strip `--` comments and split a script into statements
fn split_statements(sql: &str) -> Vec<String> {
    let mut cleaned = String::new();
    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        let without_comment = match trimmed.find("--") {
            Some(pos) => &trimmed[..pos],
            None => trimmed,
        };
        cleaned.push_str(without_comment.trim());
        cleaned.push(' ');
    }

    cleaned
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_temp() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("support.db");
        let db = Database::connect(path.to_str().unwrap()).await.unwrap();
        (dir, db)
    }

    #[test]
    fn test_split_statements() {
        let sql = "-- header\nCREATE TABLE a (x INTEGER); -- trailing\n\nCREATE TABLE b (\n  y TEXT\n);\n";
        let statements = split_statements(sql);
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0], "CREATE TABLE a (x INTEGER)");
        assert!(statements[1].starts_with("CREATE TABLE b ("));
    }

    #[test]
    fn test_embedded_migration_splits() {
        let statements =
            split_statements(include_str!("../../migrations/001_create_support_tables.sql"));
        assert!(statements.iter().any(|s| s.contains("CREATE TABLE IF NOT EXISTS tickets")));
        assert!(statements.iter().any(|s| s.contains("USING fts5")));
    }

    #[tokio::test]
    async fn test_connect_creates_directory_and_seeds() {
        let (dir, db) = open_temp().await;
        assert!(dir.path().join("nested").join("support.db").exists());

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kb")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count as usize, SEED_ARTICLES.len());
    }

    #[tokio::test]
    async fn test_reopen_does_not_duplicate_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("support.db");
        let path = path.to_str().unwrap();

        let first = Database::connect(path).await.unwrap();
        first.pool().close().await;

        let second = Database::connect(path).await.unwrap();
        assert_eq!(second.seed_knowledge_base().await.unwrap(), 0);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kb")
            .fetch_one(second.pool())
            .await
            .unwrap();
        assert_eq!(count as usize, SEED_ARTICLES.len());
    }

    #[tokio::test]
    async fn test_ping() {
        let (_dir, db) = open_temp().await;
        db.ping().await.unwrap();

        db.pool().close().await;
        assert!(matches!(
            db.ping().await,
            Err(AppError::ServiceUnavailable(_))
        ));
    }
}
