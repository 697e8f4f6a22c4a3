use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Local;
use sqlx::Row;
use shared::PackageType;

use super::schedule_rows;
use crate::domain::calendar::DateRange;
use crate::domain::models::package::Package;
use crate::storage::sqlite::codec;
use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::PackageStorage;

/// SQLite-backed package repository.
///
/// The validity span persists as midnight date strings and the schedule
/// entries as canonical birth-date rows.
#[derive(Clone)]
pub struct PackageRepository {
    db: DbConnection,
}

impl PackageRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn package_type_to_str(package_type: PackageType) -> &'static str {
        match package_type {
            PackageType::Monthly => "monthly",
            PackageType::Term => "term",
        }
    }

    fn package_type_from_str(value: &str) -> Result<PackageType> {
        match value {
            "monthly" => Ok(PackageType::Monthly),
            "term" => Ok(PackageType::Term),
            other => Err(anyhow!("Unknown package type: {}", other)),
        }
    }

    fn row_to_package(row: &sqlx::sqlite::SqliteRow) -> Result<Package> {
        Ok(Package {
            id: row.get("id"),
            program_id: row.get("program_id"),
            name: row.get("name"),
            price: row.get("price"),
            package_type: Self::package_type_from_str(&row.get::<String, _>("package_type"))?,
            months: codec::split_label_list(&row.get::<String, _>("months")),
            date_range: DateRange {
                start_date: codec::parse_midnight(&row.get::<String, _>("start_date"))?,
                end_date: codec::parse_midnight(&row.get::<String, _>("end_date"))?,
            },
            entries: Vec::new(),
            created_at: codec::parse_timestamp(&row.get::<String, _>("created_at"))?,
            updated_at: codec::parse_timestamp(&row.get::<String, _>("updated_at"))?,
        })
    }
}

#[async_trait]
impl PackageStorage for PackageRepository {
    async fn store_package(&self, package: &Package) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO packages
                (id, program_id, name, price, package_type, months, start_date, end_date,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&package.id)
        .bind(&package.program_id)
        .bind(&package.name)
        .bind(package.price)
        .bind(Self::package_type_to_str(package.package_type))
        .bind(codec::join_label_list(&package.months))
        .bind(codec::format_midnight(package.date_range.start_date))
        .bind(codec::format_midnight(package.date_range.end_date))
        .bind(package.created_at.to_rfc3339())
        .bind(package.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        let today = Local::now().date_naive();
        schedule_rows::replace_entries(self.db.pool(), &package.id, &package.entries, today).await
    }

    async fn get_package(&self, package_id: &str) -> Result<Option<Package>> {
        let row = sqlx::query(
            r#"
            SELECT id, program_id, name, price, package_type, months, start_date, end_date,
                   created_at, updated_at
            FROM packages
            WHERE id = ?
            "#,
        )
        .bind(package_id)
        .fetch_optional(self.db.pool())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut package = Self::row_to_package(&row)?;
        let today = Local::now().date_naive();
        package.entries = schedule_rows::load_entries(self.db.pool(), &package.id, today).await?;
        Ok(Some(package))
    }

    async fn list_packages(&self, program_id: Option<&str>) -> Result<Vec<Package>> {
        let rows = if let Some(program_id) = program_id {
            sqlx::query(
                r#"
                SELECT id, program_id, name, price, package_type, months, start_date, end_date,
                       created_at, updated_at
                FROM packages
                WHERE program_id = ?
                ORDER BY name ASC
                "#,
            )
            .bind(program_id)
            .fetch_all(self.db.pool())
            .await?
        } else {
            sqlx::query(
                r#"
                SELECT id, program_id, name, price, package_type, months, start_date, end_date,
                       created_at, updated_at
                FROM packages
                ORDER BY name ASC
                "#,
            )
            .fetch_all(self.db.pool())
            .await?
        };

        let today = Local::now().date_naive();
        let mut packages = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut package = Self::row_to_package(row)?;
            package.entries =
                schedule_rows::load_entries(self.db.pool(), &package.id, today).await?;
            packages.push(package);
        }
        Ok(packages)
    }

    async fn update_package(&self, package: &Package) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE packages
            SET name = ?, price = ?, package_type = ?, months = ?, start_date = ?,
                end_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&package.name)
        .bind(package.price)
        .bind(Self::package_type_to_str(package.package_type))
        .bind(codec::join_label_list(&package.months))
        .bind(codec::format_midnight(package.date_range.start_date))
        .bind(codec::format_midnight(package.date_range.end_date))
        .bind(package.updated_at.to_rfc3339())
        .bind(&package.id)
        .execute(self.db.pool())
        .await?;

        let today = Local::now().date_naive();
        schedule_rows::replace_entries(self.db.pool(), &package.id, &package.entries, today).await
    }

    async fn delete_package(&self, package_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM packages WHERE id = ?
            "#,
        )
        .bind(package_id)
        .execute(self.db.pool())
        .await?;

        schedule_rows::delete_entries(self.db.pool(), package_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use std::collections::BTreeSet;

    use crate::domain::age::AgeSpec;
    use crate::domain::age_range::{AgeBound, AgeRange};
    use crate::domain::schedule::ScheduleEntry;

    fn entry(day: u8, start_years: f64) -> ScheduleEntry {
        let genders: BTreeSet<String> = ["girls"].iter().map(|s| s.to_string()).collect();
        ScheduleEntry {
            day_of_week: day,
            from: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            to: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            memo: "Main pool".to_string(),
            age_range: AgeRange {
                start: AgeSpec::years(start_years),
                end: AgeBound::Unlimited,
            },
            genders,
        }
    }

    fn test_package(id: &str) -> Package {
        let now = Utc::now();
        Package {
            id: id.to_string(),
            program_id: "program::1".to_string(),
            name: "Spring Monthly".to_string(),
            price: 120.0,
            package_type: PackageType::Monthly,
            months: vec!["March 2025".to_string(), "January 2025".to_string()],
            date_range: DateRange {
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            },
            entries: vec![entry(1, 5.0), entry(3, 6.0)],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_package_with_entries() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = PackageRepository::new(db);

        let package = test_package("package::1");
        repo.store_package(&package).await.expect("Failed to store package");

        let loaded = repo
            .get_package("package::1")
            .await
            .expect("Failed to get package")
            .expect("Package not found");

        assert_eq!(loaded, package);
        assert_eq!(loaded.entries.len(), 2);
        // Month selection order survives storage
        assert_eq!(loaded.months[0], "March 2025");
    }

    #[tokio::test]
    async fn test_update_replaces_schedule_entries() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = PackageRepository::new(db);

        let mut package = test_package("package::1");
        repo.store_package(&package).await.unwrap();

        package.entries = vec![entry(5, 7.0)];
        repo.update_package(&package).await.expect("Failed to update package");

        let loaded = repo.get_package("package::1").await.unwrap().unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].day_of_week, 5);
    }

    #[tokio::test]
    async fn test_delete_package_drops_entries() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = PackageRepository::new(db.clone());

        repo.store_package(&test_package("package::1")).await.unwrap();
        repo.delete_package("package::1").await.expect("Failed to delete package");

        assert!(repo.get_package("package::1").await.unwrap().is_none());

        let remaining: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM schedule_entries WHERE owner_id = 'package::1'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(remaining, 0);
    }
}
