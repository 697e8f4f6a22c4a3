use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::branch::Branch;
use crate::storage::sqlite::codec;
use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::BranchStorage;

/// SQLite-backed branch repository
#[derive(Clone)]
pub struct BranchRepository {
    db: DbConnection,
}

impl BranchRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_branch(row: &sqlx::sqlite::SqliteRow) -> Result<Branch> {
        Ok(Branch {
            id: row.get("id"),
            name: row.get("name"),
            sport: row.get("sport"),
            description: row.get("description"),
            created_at: codec::parse_timestamp(&row.get::<String, _>("created_at"))?,
            updated_at: codec::parse_timestamp(&row.get::<String, _>("updated_at"))?,
        })
    }
}

#[async_trait]
impl BranchStorage for BranchRepository {
    async fn store_branch(&self, branch: &Branch) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO branches (id, name, sport, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&branch.id)
        .bind(&branch.name)
        .bind(&branch.sport)
        .bind(&branch.description)
        .bind(branch.created_at.to_rfc3339())
        .bind(branch.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_branch(&self, branch_id: &str) -> Result<Option<Branch>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, sport, description, created_at, updated_at
            FROM branches
            WHERE id = ?
            "#,
        )
        .bind(branch_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_branch(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_branches(&self) -> Result<Vec<Branch>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, sport, description, created_at, updated_at
            FROM branches
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_branch).collect()
    }

    async fn update_branch(&self, branch: &Branch) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE branches
            SET name = ?, sport = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&branch.name)
        .bind(&branch.sport)
        .bind(&branch.description)
        .bind(branch.updated_at.to_rfc3339())
        .bind(&branch.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_branch(&self, branch_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM branches WHERE id = ?
            "#,
        )
        .bind(branch_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_branch(id: &str, name: &str) -> Branch {
        let now = Utc::now();
        Branch {
            id: id.to_string(),
            name: name.to_string(),
            sport: "Swimming".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_branch() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = BranchRepository::new(db);

        let branch = test_branch("branch::1", "Downtown");
        repo.store_branch(&branch).await.expect("Failed to store branch");

        let loaded = repo.get_branch("branch::1").await.expect("Failed to get branch");
        assert_eq!(loaded, Some(branch));

        let missing = repo.get_branch("branch::nope").await.expect("Failed to query branch");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_branches_ordered_by_name() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = BranchRepository::new(db);

        repo.store_branch(&test_branch("branch::1", "Riverside")).await.unwrap();
        repo.store_branch(&test_branch("branch::2", "Airport")).await.unwrap();

        let branches = repo.list_branches().await.expect("Failed to list branches");
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].name, "Airport");
        assert_eq!(branches[1].name, "Riverside");
    }

    #[tokio::test]
    async fn test_update_and_delete_branch() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = BranchRepository::new(db);

        let mut branch = test_branch("branch::1", "Downtown");
        repo.store_branch(&branch).await.unwrap();

        branch.name = "Downtown East".to_string();
        repo.update_branch(&branch).await.expect("Failed to update branch");
        let loaded = repo.get_branch("branch::1").await.unwrap().unwrap();
        assert_eq!(loaded.name, "Downtown East");

        repo.delete_branch("branch::1").await.expect("Failed to delete branch");
        assert!(repo.get_branch("branch::1").await.unwrap().is_none());
    }
}
