use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use sqlx::Row;

use super::schedule_rows;
use crate::domain::models::assessment::Assessment;
use crate::storage::sqlite::codec;
use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::AssessmentStorage;

/// SQLite-backed assessment repository
#[derive(Clone)]
pub struct AssessmentRepository {
    db: DbConnection,
}

impl AssessmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_assessment(row: &sqlx::sqlite::SqliteRow) -> Result<Assessment> {
        Ok(Assessment {
            id: row.get("id"),
            branch_id: row.get("branch_id"),
            name: row.get("name"),
            fee: row.get("fee"),
            entries: Vec::new(),
            created_at: codec::parse_timestamp(&row.get::<String, _>("created_at"))?,
            updated_at: codec::parse_timestamp(&row.get::<String, _>("updated_at"))?,
        })
    }
}

#[async_trait]
impl AssessmentStorage for AssessmentRepository {
    async fn store_assessment(&self, assessment: &Assessment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assessments (id, branch_id, name, fee, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&assessment.id)
        .bind(&assessment.branch_id)
        .bind(&assessment.name)
        .bind(assessment.fee)
        .bind(assessment.created_at.to_rfc3339())
        .bind(assessment.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        let today = Local::now().date_naive();
        schedule_rows::replace_entries(self.db.pool(), &assessment.id, &assessment.entries, today)
            .await
    }

    async fn get_assessment(&self, assessment_id: &str) -> Result<Option<Assessment>> {
        let row = sqlx::query(
            r#"
            SELECT id, branch_id, name, fee, created_at, updated_at
            FROM assessments
            WHERE id = ?
            "#,
        )
        .bind(assessment_id)
        .fetch_optional(self.db.pool())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut assessment = Self::row_to_assessment(&row)?;
        let today = Local::now().date_naive();
        assessment.entries =
            schedule_rows::load_entries(self.db.pool(), &assessment.id, today).await?;
        Ok(Some(assessment))
    }

    async fn list_assessments(&self, branch_id: Option<&str>) -> Result<Vec<Assessment>> {
        let rows = if let Some(branch_id) = branch_id {
            sqlx::query(
                r#"
                SELECT id, branch_id, name, fee, created_at, updated_at
                FROM assessments
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
                SELECT id, branch_id, name, fee, created_at, updated_at
                FROM assessments
                ORDER BY name ASC
                "#,
            )
            .fetch_all(self.db.pool())
            .await?
        };

        let today = Local::now().date_naive();
        let mut assessments = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut assessment = Self::row_to_assessment(row)?;
            assessment.entries =
                schedule_rows::load_entries(self.db.pool(), &assessment.id, today).await?;
            assessments.push(assessment);
        }
        Ok(assessments)
    }

    async fn update_assessment(&self, assessment: &Assessment) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE assessments
            SET name = ?, fee = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&assessment.name)
        .bind(assessment.fee)
        .bind(assessment.updated_at.to_rfc3339())
        .bind(&assessment.id)
        .execute(self.db.pool())
        .await?;

        let today = Local::now().date_naive();
        schedule_rows::replace_entries(self.db.pool(), &assessment.id, &assessment.entries, today)
            .await
    }

    async fn delete_assessment(&self, assessment_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM assessments WHERE id = ?
            "#,
        )
        .bind(assessment_id)
        .execute(self.db.pool())
        .await?;

        schedule_rows::delete_entries(self.db.pool(), assessment_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use std::collections::BTreeSet;

    use crate::domain::age::AgeSpec;
    use crate::domain::age_range::{AgeBound, AgeRange};
    use crate::domain::schedule::ScheduleEntry;

    fn test_assessment(id: &str) -> Assessment {
        let now = Utc::now();
        let genders: BTreeSet<String> = ["boys"].iter().map(|s| s.to_string()).collect();
        Assessment {
            id: id.to_string(),
            branch_id: "branch::1".to_string(),
            name: "Placement Trial".to_string(),
            fee: 25.0,
            entries: vec![ScheduleEntry {
                day_of_week: 6,
                from: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                to: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
                memo: String::new(),
                age_range: AgeRange {
                    start: AgeSpec::years(6.0),
                    end: AgeBound::Limited(AgeSpec::years(12.0)),
                },
                genders,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_assessment() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = AssessmentRepository::new(db);

        let assessment = test_assessment("assessment::1");
        repo.store_assessment(&assessment).await.expect("Failed to store assessment");

        let loaded = repo
            .get_assessment("assessment::1")
            .await
            .expect("Failed to get assessment");
        assert_eq!(loaded, Some(assessment));
    }

    #[tokio::test]
    async fn test_entries_do_not_leak_between_owners() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = AssessmentRepository::new(db);

        repo.store_assessment(&test_assessment("assessment::1")).await.unwrap();
        let mut second = test_assessment("assessment::2");
        second.entries.clear();
        repo.store_assessment(&second).await.unwrap();

        let loaded = repo.get_assessment("assessment::2").await.unwrap().unwrap();
        assert!(loaded.entries.is_empty());
    }
}
