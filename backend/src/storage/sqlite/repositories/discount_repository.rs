use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::calendar::DateRange;
use crate::domain::models::discount::Discount;
use crate::storage::sqlite::codec;
use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::DiscountStorage;

/// SQLite-backed discount repository
#[derive(Clone)]
pub struct DiscountRepository {
    db: DbConnection,
}

impl DiscountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_discount(row: &sqlx::sqlite::SqliteRow) -> Result<Discount> {
        Ok(Discount {
            id: row.get("id"),
            name: row.get("name"),
            percent: row.get("percent"),
            months: codec::split_label_list(&row.get::<String, _>("months")),
            date_range: DateRange {
                start_date: codec::parse_midnight(&row.get::<String, _>("start_date"))?,
                end_date: codec::parse_midnight(&row.get::<String, _>("end_date"))?,
            },
            created_at: codec::parse_timestamp(&row.get::<String, _>("created_at"))?,
            updated_at: codec::parse_timestamp(&row.get::<String, _>("updated_at"))?,
        })
    }
}

#[async_trait]
impl DiscountStorage for DiscountRepository {
    async fn store_discount(&self, discount: &Discount) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO discounts (id, name, percent, months, start_date, end_date,
                                   created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&discount.id)
        .bind(&discount.name)
        .bind(discount.percent)
        .bind(codec::join_label_list(&discount.months))
        .bind(codec::format_midnight(discount.date_range.start_date))
        .bind(codec::format_midnight(discount.date_range.end_date))
        .bind(discount.created_at.to_rfc3339())
        .bind(discount.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_discount(&self, discount_id: &str) -> Result<Option<Discount>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, percent, months, start_date, end_date, created_at, updated_at
            FROM discounts
            WHERE id = ?
            "#,
        )
        .bind(discount_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_discount(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_discounts(&self) -> Result<Vec<Discount>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, percent, months, start_date, end_date, created_at, updated_at
            FROM discounts
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_discount).collect()
    }

    async fn update_discount(&self, discount: &Discount) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE discounts
            SET name = ?, percent = ?, months = ?, start_date = ?, end_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&discount.name)
        .bind(discount.percent)
        .bind(codec::join_label_list(&discount.months))
        .bind(codec::format_midnight(discount.date_range.start_date))
        .bind(codec::format_midnight(discount.date_range.end_date))
        .bind(discount.updated_at.to_rfc3339())
        .bind(&discount.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_discount(&self, discount_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM discounts WHERE id = ?
            "#,
        )
        .bind(discount_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn test_discount(id: &str) -> Discount {
        let now = Utc::now();
        Discount {
            id: id.to_string(),
            name: "Early Spring".to_string(),
            percent: 15.0,
            months: vec!["January 2025".to_string(), "February 2025".to_string()],
            date_range: DateRange {
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_discount() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = DiscountRepository::new(db);

        let discount = test_discount("discount::1");
        repo.store_discount(&discount).await.expect("Failed to store discount");

        let loaded = repo.get_discount("discount::1").await.expect("Failed to get discount");
        assert_eq!(loaded, Some(discount));
    }

    #[tokio::test]
    async fn test_update_discount_months() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = DiscountRepository::new(db);

        let mut discount = test_discount("discount::1");
        repo.store_discount(&discount).await.unwrap();

        discount.months = vec!["March 2025".to_string()];
        discount.date_range = DateRange {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        };
        repo.update_discount(&discount).await.expect("Failed to update discount");

        let loaded = repo.get_discount("discount::1").await.unwrap().unwrap();
        assert_eq!(loaded.months, vec!["March 2025"]);
        assert_eq!(
            loaded.date_range.end_date,
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
        );
    }
}
