//! Authentication data models and DTOs.
//!
//! The access-control record ([`Profile`]) is the authoritative source of a
//! caller's role. It lives in the `profiles` table, keyed by the identity id
//! the provider hands out.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Roles a caller can hold. Matched exactly, no hierarchy between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access-control record from the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub name: Option<String>,
}

/// Row inserted into `profiles` when a new account registers.
#[derive(Debug, Serialize)]
pub struct NewProfile {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "El email no es válido"))]
    pub email: String,
    #[validate(length(min = 1, message = "El password es obligatorio"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub name: String,
    #[validate(email(message = "El email no es válido"))]
    pub email: String,
    #[validate(length(min = 6, message = "El password debe tener al menos 6 caracteres"))]
    pub password: String,
}

/// Session token plus the caller's profile, returned by login and register.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub user: Profile,
}

/// Shape of `GET /me`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}
