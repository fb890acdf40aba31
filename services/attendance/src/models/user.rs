//! Staff user model, roles, and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role resolved for an actor by the authorization collaborator.
///
/// `Admin` and `Teacher` come from the staff table, `Student` from the
/// student roster; `None` means the id resolves to nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    None,
}

impl Role {
    /// Database representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
            Role::None => "NONE",
        }
    }

    /// Parse the database representation back into a role
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ADMIN" => Some(Role::Admin),
            "TEACHER" => Some(Role::Teacher),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }

    /// Whether this role may create and manage sessions
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Teacher)
    }
}

/// Staff user entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}

/// New staff user creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// New teacher creation payload; the TEACHER role is implied
#[derive(Debug, Clone, Deserialize)]
pub struct NewTeacherRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Staff user update payload
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
}

/// Staff login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}
