//! Shared persistence for schedule entries.
//!
//! Packages and assessments both own a group of sessions; the rows live
//! in one table keyed by the globally-unique owner ID plus position. Age
//! ranges are handed to the store in their canonical birth-date form and
//! derived back into form units on load.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::domain::age_range::{age_range_from_dates, resolve_age_range, DateOfBirthRange};
use crate::domain::schedule::ScheduleEntry;
use crate::storage::sqlite::codec;

/// Replace an owner's schedule entry rows with the given group.
pub(super) async fn replace_entries(
    pool: &SqlitePool,
    owner_id: &str,
    entries: &[ScheduleEntry],
    today: NaiveDate,
) -> Result<()> {
    delete_entries(pool, owner_id).await?;

    for (position, entry) in entries.iter().enumerate() {
        let dob = resolve_age_range(&entry.age_range, today);
        sqlx::query(
            r#"
            INSERT INTO schedule_entries
                (owner_id, position, day_of_week, time_from, time_to, memo,
                 start_date_of_birth, end_date_of_birth, genders)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(owner_id)
        .bind(position as i64)
        .bind(entry.day_of_week as i64)
        .bind(codec::format_time(entry.from))
        .bind(codec::format_time(entry.to))
        .bind(&entry.memo)
        .bind(codec::format_midnight(dob.start_date_of_birth))
        .bind(codec::format_midnight(dob.end_date_of_birth))
        .bind(codec::join_label_set(&entry.genders))
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Load an owner's schedule entries in position order.
pub(super) async fn load_entries(
    pool: &SqlitePool,
    owner_id: &str,
    today: NaiveDate,
) -> Result<Vec<ScheduleEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT day_of_week, time_from, time_to, memo,
               start_date_of_birth, end_date_of_birth, genders
        FROM schedule_entries
        WHERE owner_id = ?
        ORDER BY position ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let dob = DateOfBirthRange {
                start_date_of_birth: codec::parse_midnight(
                    &row.get::<String, _>("start_date_of_birth"),
                )?,
                end_date_of_birth: codec::parse_midnight(
                    &row.get::<String, _>("end_date_of_birth"),
                )?,
            };
            Ok(ScheduleEntry {
                day_of_week: row.get::<i64, _>("day_of_week") as u8,
                from: codec::parse_time(&row.get::<String, _>("time_from"))?,
                to: codec::parse_time(&row.get::<String, _>("time_to"))?,
                memo: row.get("memo"),
                age_range: age_range_from_dates(&dob, today),
                genders: codec::split_label_set(&row.get::<String, _>("genders")),
            })
        })
        .collect()
}

/// Drop all schedule entry rows for an owner.
pub(super) async fn delete_entries(pool: &SqlitePool, owner_id: &str) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM schedule_entries WHERE owner_id = ?
        "#,
    )
    .bind(owner_id)
    .execute(pool)
    .await?;
    Ok(())
}
