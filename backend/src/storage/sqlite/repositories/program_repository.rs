use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::age_range::DateOfBirthRange;
use crate::domain::models::program::Program;
use crate::storage::sqlite::codec;
use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::ProgramStorage;

/// SQLite-backed program repository.
///
/// The admission window persists as two midnight birth-date strings, the
/// store's canonical form.
#[derive(Clone)]
pub struct ProgramRepository {
    db: DbConnection,
}

impl ProgramRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_program(row: &sqlx::sqlite::SqliteRow) -> Result<Program> {
        Ok(Program {
            id: row.get("id"),
            branch_id: row.get("branch_id"),
            name: row.get("name"),
            genders: codec::split_label_set(&row.get::<String, _>("genders")),
            dob_range: DateOfBirthRange {
                start_date_of_birth: codec::parse_midnight(
                    &row.get::<String, _>("start_date_of_birth"),
                )?,
                end_date_of_birth: codec::parse_midnight(
                    &row.get::<String, _>("end_date_of_birth"),
                )?,
            },
            created_at: codec::parse_timestamp(&row.get::<String, _>("created_at"))?,
            updated_at: codec::parse_timestamp(&row.get::<String, _>("updated_at"))?,
        })
    }
}

#[async_trait]
impl ProgramStorage for ProgramRepository {
    async fn store_program(&self, program: &Program) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO programs
                (id, branch_id, name, genders, start_date_of_birth, end_date_of_birth,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&program.id)
        .bind(&program.branch_id)
        .bind(&program.name)
        .bind(codec::join_label_set(&program.genders))
        .bind(codec::format_midnight(program.dob_range.start_date_of_birth))
        .bind(codec::format_midnight(program.dob_range.end_date_of_birth))
        .bind(program.created_at.to_rfc3339())
        .bind(program.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_program(&self, program_id: &str) -> Result<Option<Program>> {
        let row = sqlx::query(
            r#"
            SELECT id, branch_id, name, genders, start_date_of_birth, end_date_of_birth,
                   created_at, updated_at
            FROM programs
            WHERE id = ?
            "#,
        )
        .bind(program_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_program(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_programs(&self, branch_id: Option<&str>) -> Result<Vec<Program>> {
        let rows = if let Some(branch_id) = branch_id {
            sqlx::query(
                r#"
                SELECT id, branch_id, name, genders, start_date_of_birth, end_date_of_birth,
                       created_at, updated_at
                FROM programs
                WHERE branch_id = ?
                ORDER BY name ASC
                "#,
            )
            .bind(branch_id)
            .fetch_all(self.db.pool())
            .await?
        } else {
            sqlx::query(
                r#"
                SELECT id, branch_id, name, genders, start_date_of_birth, end_date_of_birth,
                       created_at, updated_at
                FROM programs
                ORDER BY name ASC
                "#,
            )
            .fetch_all(self.db.pool())
            .await?
        };

        rows.iter().map(Self::row_to_program).collect()
    }

    async fn update_program(&self, program: &Program) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE programs
            SET name = ?, genders = ?, start_date_of_birth = ?, end_date_of_birth = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&program.name)
        .bind(codec::join_label_set(&program.genders))
        .bind(codec::format_midnight(program.dob_range.start_date_of_birth))
        .bind(codec::format_midnight(program.dob_range.end_date_of_birth))
        .bind(program.updated_at.to_rfc3339())
        .bind(&program.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_program(&self, program_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM programs WHERE id = ?
            "#,
        )
        .bind(program_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeSet;

    fn test_program(id: &str) -> Program {
        let now = Utc::now();
        let genders: BTreeSet<String> =
            ["girls", "boys"].iter().map(|s| s.to_string()).collect();
        Program {
            id: id.to_string(),
            branch_id: "branch::1".to_string(),
            name: "Junior Swim".to_string(),
            genders,
            dob_range: DateOfBirthRange {
                start_date_of_birth: NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
                end_date_of_birth: NaiveDate::from_ymd_opt(2017, 6, 15).unwrap(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_program() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = ProgramRepository::new(db);

        let program = test_program("program::1");
        repo.store_program(&program).await.expect("Failed to store program");

        let loaded = repo.get_program("program::1").await.expect("Failed to get program");
        assert_eq!(loaded, Some(program));
    }

    #[tokio::test]
    async fn test_dob_range_persists_as_midnight_strings() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = ProgramRepository::new(db.clone());

        repo.store_program(&test_program("program::1")).await.unwrap();

        let row = sqlx::query(
            r#"
            SELECT start_date_of_birth, end_date_of_birth FROM programs WHERE id = ?
            "#,
        )
        .bind("program::1")
        .fetch_one(db.pool())
        .await
        .unwrap();

        assert_eq!(
            row.get::<String, _>("start_date_of_birth"),
            "2020-06-15 00:00:00"
        );
        assert_eq!(
            row.get::<String, _>("end_date_of_birth"),
            "2017-06-15 00:00:00"
        );
    }

    #[tokio::test]
    async fn test_list_programs_filters_by_branch() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = ProgramRepository::new(db);

        let mut other = test_program("program::2");
        other.branch_id = "branch::2".to_string();

        repo.store_program(&test_program("program::1")).await.unwrap();
        repo.store_program(&other).await.unwrap();

        assert_eq!(repo.list_programs(None).await.unwrap().len(), 2);
        assert_eq!(repo.list_programs(Some("branch::1")).await.unwrap().len(), 1);
    }
}
