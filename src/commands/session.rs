//! Signed-in console session.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Hotel, Room, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{seed, Persistence};
use crate::services::{ServiceContainer, Services};

pub struct Session {
    pub services: Services,
    pub user: User,
    hotel: Option<String>,
}

impl Session {
    /// Connect the store, seed it on first use and sign in.
    ///
    /// Without explicit credentials the configured administrator is used.
    pub async fn open(
        email: Option<&str>,
        password: Option<&str>,
        hotel: Option<String>,
        config: &Config,
    ) -> AppResult<Self> {
        let uow = Arc::new(Persistence::connect(config).await?);

        let summary = seed::run(uow.as_ref(), config).await?;
        if !summary.skipped {
            tracing::info!("Seeded a fresh store");
        }

        let services = Services::from_persistence(uow, config);
        let email = email.unwrap_or(&config.admin_email);
        let password = password.unwrap_or(config.admin_password());
        let user = services.auth().login(email, password).await?;
        tracing::debug!("Session opened for {}", user.email);

        Ok(Self {
            services,
            user,
            hotel,
        })
    }

    /// The hotel named by `--hotel`, or the first one the user may see
    pub async fn hotel(&self) -> AppResult<Hotel> {
        let hotels = self.services.hotels().hotels_for_user(&self.user).await?;

        let selected = match self.hotel.as_deref() {
            Some(selector) => hotels.into_iter().find(|hotel| {
                hotel.id.to_string() == selector || hotel.name.eq_ignore_ascii_case(selector)
            }),
            None => hotels.into_iter().next(),
        };
        selected.ok_or_else(|| AppError::not_found("Hotel"))
    }

    /// Look a room up by number within a hotel
    pub async fn room(&self, hotel_id: Uuid, number: &str) -> AppResult<Room> {
        self.services
            .rooms()
            .rooms(&self.user, hotel_id)
            .await?
            .into_iter()
            .find(|room| room.number == number.trim())
            .ok_or_else(|| AppError::not_found("Room"))
    }
}
