//! User records with e-mail uniqueness.

use uuid::Uuid;

use super::{ReadRepository, Record, Repository, WriteRepository};
use crate::config::COLLECTION_USERS;
use crate::domain::{normalize_email, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::store::IndexSpec;

impl Record for User {
    const COLLECTION: &'static str = COLLECTION_USERS;
    const ENTITY: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::unique("email", "email"),
            IndexSpec::new("role", "role"),
        ]
    }
}

impl Repository<User> {
    /// Find user by e-mail, case-insensitively
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .find_by_index("email", &normalize_email(email))
            .await?
            .into_iter()
            .next())
    }

    pub async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        self.find_by_index("role", &role.to_string()).await
    }

    /// Insert a new user, rejecting a taken e-mail and staff without a hotel.
    pub async fn create(&self, mut user: User) -> AppResult<User> {
        if user.role == UserRole::Staff && user.hotel_id.is_none() {
            return Err(AppError::validation("Staff users must be assigned to a hotel"));
        }

        user.email = normalize_email(&user.email);
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        self.save(&user).await?;
        Ok(user)
    }
}
