//! Student repository for database operations

use common::error::DatabaseResult;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{NewStudent, Student, UpdateStudent};

/// Student repository
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Create a new student repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new student
    pub async fn create(&self, new_student: &NewStudent) -> DatabaseResult<Student> {
        info!("Creating student {}", new_student.id);

        let row = sqlx::query(
            r#"
            INSERT INTO students (id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, email
            "#,
        )
        .bind(new_student.id)
        .bind(&new_student.name)
        .bind(&new_student.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(Student {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
        })
    }

    /// Get all students
    pub async fn get_all(&self) -> DatabaseResult<Vec<Student>> {
        let rows = sqlx::query("SELECT id, name, email FROM students ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Student {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
            })
            .collect())
    }

    /// Update a student's name and email
    pub async fn update(&self, id: i64, update: &UpdateStudent) -> DatabaseResult<bool> {
        let result = sqlx::query("UPDATE students SET name = $1, email = $2 WHERE id = $3")
            .bind(&update.name)
            .bind(&update.email)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a student
    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find a student by id and email (the roster login check)
    pub async fn find_by_id_and_email(
        &self,
        id: i64,
        email: &str,
    ) -> DatabaseResult<Option<Student>> {
        let row = sqlx::query("SELECT id, name, email FROM students WHERE id = $1 AND email = $2")
            .bind(id)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Student {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
        }))
    }
}
