//! Session repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Row};

use crate::models::{NewSession, Session};
use crate::store::SessionStore;

/// Session repository
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Session {
        Session {
            id: row.get("id"),
            code: row.get("code"),
            name: row.get("name"),
            location_lat: row.get("location_lat"),
            location_long: row.get("location_long"),
            expiry_time: row.get("expiry_time"),
            created_by: row.get("created_by"),
        }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn insert(&self, new_session: &NewSession) -> DatabaseResult<Session> {
        let row = sqlx::query(
            r#"
            INSERT INTO sessions (code, name, location_lat, location_long, expiry_time, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, code, name, location_lat, location_long, expiry_time, created_by
            "#,
        )
        .bind(&new_session.code)
        .bind(&new_session.name)
        .bind(new_session.location_lat)
        .bind(new_session.location_long)
        .bind(new_session.expiry_time)
        .bind(new_session.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::from_row(&row))
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT id, code, name, location_lat, location_long, expiry_time, created_by
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn list(&self) -> DatabaseResult<Vec<Session>> {
        let rows = sqlx::query(
            r#"
            SELECT id, code, name, location_lat, location_long, expiry_time, created_by
            FROM sessions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
