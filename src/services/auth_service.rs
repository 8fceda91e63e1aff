//! Authentication service - Handles sign-in and account credentials.
//!
//! Passwords are hashed by the domain `Password` value object; this service
//! only looks users up and compares.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{NewUser, Password, User, UserProfile};
use crate::errors::{AppError, AppResult};
use crate::infra::{ReadRepository, UnitOfWork, WriteRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account
    async fn register(&self, input: NewUser) -> AppResult<UserProfile>;

    /// Verify credentials and return the signed-in user
    async fn login(&self, email: &str, password: &str) -> AppResult<User>;

    /// Replace a password after checking the current one
    async fn change_password(&self, user_id: Uuid, current: &str, new: &str) -> AppResult<()>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, input: NewUser) -> AppResult<UserProfile> {
        input.validate()?;

        let password_hash = Password::new(&input.password)?.into_string();
        let user = User::new(input.email, password_hash, input.name, input.role, input.hotel_id)?;

        if let Some(hotel_id) = user.hotel_id {
            self.uow.hotels().get(hotel_id).await?;
        }

        let user = self.uow.users().create(user).await?;
        tracing::info!("Registered {} user {}", user.role, user.email);
        Ok(UserProfile::from(user))
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let user = match self.uow.users().find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login attempt for unknown account");
                return Err(AppError::InvalidCredentials);
            }
        };

        let stored = Password::from_hash(user.password_hash.clone());
        if !stored.verify(password) || !user.active {
            tracing::warn!("Rejected login for {}", user.email);
            return Err(AppError::InvalidCredentials);
        }

        tracing::debug!("User {} signed in", user.email);
        Ok(user)
    }

    async fn change_password(&self, user_id: Uuid, current: &str, new: &str) -> AppResult<()> {
        let mut user = self.uow.users().get(user_id).await?;

        if !Password::from_hash(user.password_hash.clone()).verify(current) {
            return Err(AppError::InvalidCredentials);
        }

        user.set_password_hash(Password::new(new)?.into_string());
        self.uow.users().save(&user).await?;
        tracing::info!("Password changed for {}", user.email);
        Ok(())
    }
}
