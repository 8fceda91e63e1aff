//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_STAFF};
use crate::errors::{AppError, AppResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl TryFrom<&str> for UserRole {
    type Error = AppError;

    fn try_from(s: &str) -> AppResult<Self> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_STAFF => Ok(UserRole::Staff),
            other => Err(AppError::validation(format!("Unknown role '{}'", other))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Staff => write!(f, "{}", ROLE_STAFF),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    /// Hotel a staff member works at; admins have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<Uuid>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Create a new active user. Staff must name their hotel.
    pub fn new(
        email: String,
        password_hash: String,
        name: String,
        role: UserRole,
        hotel_id: Option<Uuid>,
    ) -> AppResult<Self> {
        if role == UserRole::Staff && hotel_id.is_none() {
            return Err(AppError::validation("Staff users must be assigned to a hotel"));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email: normalize_email(&email),
            password_hash,
            name,
            role,
            hotel_id: if role.is_admin() { None } else { hotel_id },
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this user may operate on the given hotel
    pub fn can_access_hotel(&self, hotel_id: Uuid) -> bool {
        self.is_admin() || self.hotel_id == Some(hotel_id)
    }

    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = hash;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}

/// E-mail addresses are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "A valid e-mail address is required"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub role: UserRole,
    pub hotel_id: Option<Uuid>,
}

/// User profile (safe to print, no hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            hotel_id: user.hotel_id,
            created_at: user.created_at,
        }
    }
}
