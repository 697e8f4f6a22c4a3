//! Database connection and schema management.

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:academy.db";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database, honoring the `ACADEMY_TRACKER_DB`
    /// environment override
    pub async fn init() -> Result<Self> {
        let url =
            std::env::var("ACADEMY_TRACKER_DB").unwrap_or_else(|_| DATABASE_URL.to_string());
        Self::new(&url).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS branches (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                sport TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS athletes (
                id TEXT PRIMARY KEY,
                branch_id TEXT NOT NULL,
                name TEXT NOT NULL,
                date_of_birth TEXT NOT NULL,
                gender TEXT,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_athletes_branch_id
            ON athletes(branch_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS programs (
                id TEXT PRIMARY KEY,
                branch_id TEXT NOT NULL,
                name TEXT NOT NULL,
                genders TEXT NOT NULL,
                start_date_of_birth TEXT NOT NULL,
                end_date_of_birth TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS packages (
                id TEXT PRIMARY KEY,
                program_id TEXT NOT NULL,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                package_type TEXT NOT NULL,
                months TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS assessments (
                id TEXT PRIMARY KEY,
                branch_id TEXT NOT NULL,
                name TEXT NOT NULL,
                fee REAL NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Schedule entries for packages and assessments; owner IDs are
        // globally unique so one table serves both.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schedule_entries (
                owner_id TEXT NOT NULL,
                position INTEGER NOT NULL,
                day_of_week INTEGER NOT NULL,
                time_from TEXT NOT NULL,
                time_to TEXT NOT NULL,
                memo TEXT NOT NULL,
                start_date_of_birth TEXT NOT NULL,
                end_date_of_birth TEXT NOT NULL,
                genders TEXT NOT NULL,
                PRIMARY KEY (owner_id, position)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS discounts (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                percent REAL NOT NULL,
                months TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
