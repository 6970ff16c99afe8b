use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::db::models::{Availability, InsertAvailability};
use crate::db::DatabaseError;

use super::{into_database_error, parse_stored_time};

#[derive(Debug, sqlx::FromRow)]
struct AvailabilityRow {
    id: Uuid,
    stylist_id: Uuid,
    date: Date,
    start_time: String,
    end_time: String,
}

impl TryFrom<AvailabilityRow> for Availability {
    type Error = DatabaseError;

    fn try_from(row: AvailabilityRow) -> Result<Self, Self::Error> {
        Ok(Availability {
            id: row.id,
            stylist_id: row.stylist_id,
            date: row.date,
            start_time: parse_stored_time(&row.start_time)?,
            end_time: parse_stored_time(&row.end_time)?,
        })
    }
}

pub struct AvailabilityRepository;

impl AvailabilityRepository {
    pub async fn insert(
        pool: &PgPool,
        data: &InsertAvailability,
    ) -> Result<Availability, DatabaseError> {
        let row = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            INSERT INTO availabilities (stylist_id, date, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id, stylist_id, date, start_time, end_time
            "#,
        )
        .bind(data.stylist_id)
        .bind(data.date)
        .bind(data.start_time.to_string())
        .bind(data.end_time.to_string())
        .fetch_one(pool)
        .await
        .map_err(into_database_error)?;

        row.try_into()
    }

    pub async fn find_for_date(
        pool: &PgPool,
        stylist_id: Uuid,
        date: Date,
    ) -> Result<Option<Availability>, DatabaseError> {
        let row = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            SELECT id, stylist_id, date, start_time, end_time
            FROM availabilities
            WHERE stylist_id = $1 AND date = $2
            "#,
        )
        .bind(stylist_id)
        .bind(date)
        .fetch_optional(pool)
        .await
        .map_err(into_database_error)?;

        row.map(TryInto::try_into).transpose()
    }

    pub async fn list_for_stylist(
        pool: &PgPool,
        stylist_id: Uuid,
    ) -> Result<Vec<Availability>, DatabaseError> {
        let rows = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            SELECT id, stylist_id, date, start_time, end_time
            FROM availabilities
            WHERE stylist_id = $1
            ORDER BY date, start_time
            "#,
        )
        .bind(stylist_id)
        .fetch_all(pool)
        .await
        .map_err(into_database_error)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Deleting an id that no longer exists is a successful no-op.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM availabilities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(into_database_error)?;
        Ok(())
    }
}
