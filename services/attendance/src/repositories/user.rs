//! Staff user repository for database operations

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{NewUser, Role, UpdateUser, User};
use crate::store::RoleProvider;

/// Staff user repository; doubles as the authorization collaborator
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> User {
        User {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role: row.get("role"),
        }
    }

    /// Create a new staff user with a hashed password
    pub async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!("Creating staff user {}", new_user.email);

        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(new_user.password.as_bytes(), &salt)
            .map_err(|e| DatabaseError::Configuration(format!("Failed to hash password: {e}")))?
            .to_string();

        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(new_user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::from_row(&row))
    }

    /// Find a staff user by email
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    /// Verify a staff password against the stored hash
    pub fn verify_password(&self, user: &User, password: &str) -> DatabaseResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
            DatabaseError::Configuration(format!("Failed to parse password hash: {e}"))
        })?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Get all users with the TEACHER role
    pub async fn get_teachers(&self) -> DatabaseResult<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, name, email, password_hash, role FROM users WHERE role = 'TEACHER' ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    /// Update a staff user's name and email
    pub async fn update(&self, id: i64, update: &UpdateUser) -> DatabaseResult<bool> {
        let result = sqlx::query("UPDATE users SET name = $1, email = $2 WHERE id = $3")
            .bind(&update.name)
            .bind(&update.email)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user only if the row holds the TEACHER role
    pub async fn delete_teacher(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = 'TEACHER'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RoleProvider for UserRepository {
    /// Resolve an actor id: staff role first, then the student roster,
    /// otherwise `None`.
    async fn role_of(&self, user_id: i64) -> DatabaseResult<Role> {
        let staff = sqlx::query("SELECT role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = staff {
            let raw: String = row.get("role");
            return Ok(Role::parse(&raw).unwrap_or(Role::None));
        }

        let student = sqlx::query("SELECT 1 AS present FROM students WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        if student.is_some() {
            Ok(Role::Student)
        } else {
            Ok(Role::None)
        }
    }
}
