use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewStylist, Stylist};
use crate::db::DatabaseError;

use super::into_database_error;

pub struct StylistRepository;

impl StylistRepository {
    pub async fn insert(pool: &PgPool, data: &NewStylist) -> Result<Stylist, DatabaseError> {
        sqlx::query_as::<_, Stylist>(
            r#"
            INSERT INTO stylists (username, display_name, is_stylist)
            VALUES ($1, $2, $3)
            RETURNING id, username, display_name, is_stylist
            "#,
        )
        .bind(&data.username)
        .bind(&data.display_name)
        .bind(data.is_stylist)
        .fetch_one(pool)
        .await
        .map_err(into_database_error)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Stylist>, DatabaseError> {
        sqlx::query_as::<_, Stylist>(
            r#"
            SELECT id, username, display_name, is_stylist
            FROM stylists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(into_database_error)
    }

    pub async fn list_stylists(pool: &PgPool) -> Result<Vec<Stylist>, DatabaseError> {
        sqlx::query_as::<_, Stylist>(
            r#"
            SELECT id, username, display_name, is_stylist
            FROM stylists
            WHERE is_stylist
            ORDER BY username
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(into_database_error)
    }
}
