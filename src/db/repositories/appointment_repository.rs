use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::db::models::{Appointment, InsertAppointment};
use crate::db::DatabaseError;

use super::{into_database_error, parse_stored_time};

#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    stylist_id: Uuid,
    client_name: String,
    client_email: String,
    date: Date,
    start_time: String,
    end_time: String,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DatabaseError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            stylist_id: row.stylist_id,
            client_name: row.client_name,
            client_email: row.client_email,
            date: row.date,
            start_time: parse_stored_time(&row.start_time)?,
            end_time: parse_stored_time(&row.end_time)?,
        })
    }
}

pub struct AppointmentRepository;

impl AppointmentRepository {
    /// Relies on the appointments_slot_key unique constraint: a concurrent
    /// insert for the same (stylist, date, start) surfaces as Duplicate.
    pub async fn insert(
        pool: &PgPool,
        data: &InsertAppointment,
    ) -> Result<Appointment, DatabaseError> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            r#"
            INSERT INTO appointments (stylist_id, client_name, client_email, date, start_time, end_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, stylist_id, client_name, client_email, date, start_time, end_time
            "#,
        )
        .bind(data.stylist_id)
        .bind(&data.client_name)
        .bind(&data.client_email)
        .bind(data.date)
        .bind(data.start_time.to_string())
        .bind(data.end_time.to_string())
        .fetch_one(pool)
        .await
        .map_err(into_database_error)?;

        row.try_into()
    }

    /// Zero-padded HH:MM text sorts chronologically, so ordering by the
    /// raw column is safe.
    pub async fn list_for_day(
        pool: &PgPool,
        stylist_id: Uuid,
        date: Date,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT id, stylist_id, client_name, client_email, date, start_time, end_time
            FROM appointments
            WHERE stylist_id = $1 AND date = $2
            ORDER BY start_time
            "#,
        )
        .bind(stylist_id)
        .bind(date)
        .fetch_all(pool)
        .await
        .map_err(into_database_error)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    pub async fn list_for_stylist(
        pool: &PgPool,
        stylist_id: Uuid,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT id, stylist_id, client_name, client_email, date, start_time, end_time
            FROM appointments
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

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(into_database_error)?;
        Ok(())
    }
}
