use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::athlete::Athlete;
use crate::storage::sqlite::codec;
use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::AthleteStorage;

/// SQLite-backed athlete repository
#[derive(Clone)]
pub struct AthleteRepository {
    db: DbConnection,
}

impl AthleteRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_athlete(row: &sqlx::sqlite::SqliteRow) -> Result<Athlete> {
        Ok(Athlete {
            id: row.get("id"),
            branch_id: row.get("branch_id"),
            name: row.get("name"),
            date_of_birth: codec::parse_date(&row.get::<String, _>("date_of_birth"))?,
            gender: row.get("gender"),
            notes: row.get("notes"),
            created_at: codec::parse_timestamp(&row.get::<String, _>("created_at"))?,
            updated_at: codec::parse_timestamp(&row.get::<String, _>("updated_at"))?,
        })
    }
}

#[async_trait]
impl AthleteStorage for AthleteRepository {
    async fn store_athlete(&self, athlete: &Athlete) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO athletes (id, branch_id, name, date_of_birth, gender, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&athlete.id)
        .bind(&athlete.branch_id)
        .bind(&athlete.name)
        .bind(codec::format_date(athlete.date_of_birth))
        .bind(&athlete.gender)
        .bind(&athlete.notes)
        .bind(athlete.created_at.to_rfc3339())
        .bind(athlete.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_athlete(&self, athlete_id: &str) -> Result<Option<Athlete>> {
        let row = sqlx::query(
            r#"
            SELECT id, branch_id, name, date_of_birth, gender, notes, created_at, updated_at
            FROM athletes
            WHERE id = ?
            "#,
        )
        .bind(athlete_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_athlete(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_athletes(&self, branch_id: Option<&str>) -> Result<Vec<Athlete>> {
        let rows = if let Some(branch_id) = branch_id {
            sqlx::query(
                r#"
                SELECT id, branch_id, name, date_of_birth, gender, notes, created_at, updated_at
                FROM athletes
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
                SELECT id, branch_id, name, date_of_birth, gender, notes, created_at, updated_at
                FROM athletes
                ORDER BY name ASC
                "#,
            )
            .fetch_all(self.db.pool())
            .await?
        };

        rows.iter().map(Self::row_to_athlete).collect()
    }

    async fn update_athlete(&self, athlete: &Athlete) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE athletes
            SET name = ?, date_of_birth = ?, gender = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&athlete.name)
        .bind(codec::format_date(athlete.date_of_birth))
        .bind(&athlete.gender)
        .bind(&athlete.notes)
        .bind(athlete.updated_at.to_rfc3339())
        .bind(&athlete.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_athlete(&self, athlete_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM athletes WHERE id = ?
            "#,
        )
        .bind(athlete_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}
