//! Student model and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Student entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// New student creation payload (ids are assigned by the institution)
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Student update payload
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudent {
    pub name: String,
    pub email: String,
}

/// Student login credentials (email doubles as the password)
#[derive(Debug, Clone, Deserialize)]
pub struct StudentLoginRequest {
    pub id: i64,
    pub email: String,
}
