//! Hotel service - Hotel catalogue and hotel selection.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_admin, ensure_hotel_access};
use crate::domain::{Hotel, HotelUpdate, NewHotel, Room, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{Changeset, ReadRepository, UnitOfWork, WriteRepository};

#[async_trait]
pub trait HotelService: Send + Sync {
    /// Hotels the user may select: every hotel for admins, their own for staff
    async fn hotels_for_user(&self, actor: &User) -> AppResult<Vec<Hotel>>;

    async fn get_hotel(&self, actor: &User, hotel_id: Uuid) -> AppResult<Hotel>;

    async fn create_hotel(&self, actor: &User, input: NewHotel) -> AppResult<Hotel>;

    async fn update_hotel(&self, actor: &User, hotel_id: Uuid, update: HotelUpdate)
        -> AppResult<Hotel>;

    /// Remove a hotel and its rooms; refused while reservations are active
    async fn delete_hotel(&self, actor: &User, hotel_id: Uuid) -> AppResult<()>;
}

pub struct HotelManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> HotelManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> HotelService for HotelManager<U> {
    async fn hotels_for_user(&self, actor: &User) -> AppResult<Vec<Hotel>> {
        if actor.is_admin() {
            return self.uow.hotels().list().await;
        }

        match actor.hotel_id {
            Some(hotel_id) => Ok(self.uow.hotels().find_by_id(hotel_id).await?.into_iter().collect()),
            None => Ok(Vec::new()),
        }
    }

    async fn get_hotel(&self, actor: &User, hotel_id: Uuid) -> AppResult<Hotel> {
        ensure_hotel_access(actor, hotel_id)?;
        self.uow.hotels().get(hotel_id).await
    }

    async fn create_hotel(&self, actor: &User, input: NewHotel) -> AppResult<Hotel> {
        ensure_admin(actor)?;
        input.validate()?;

        if self.uow.hotels().find_by_name(&input.name).await?.is_some() {
            return Err(AppError::conflict(format!("Hotel {} already exists", input.name)));
        }

        let hotel = Hotel::new(input);
        self.uow.hotels().save(&hotel).await?;
        tracing::info!("Created hotel {}", hotel.name);
        Ok(hotel)
    }

    async fn update_hotel(
        &self,
        actor: &User,
        hotel_id: Uuid,
        update: HotelUpdate,
    ) -> AppResult<Hotel> {
        ensure_admin(actor)?;
        update.validate()?;

        let mut hotel = self.uow.hotels().get(hotel_id).await?;
        hotel.apply(update);
        self.uow.hotels().save(&hotel).await?;
        Ok(hotel)
    }

    async fn delete_hotel(&self, actor: &User, hotel_id: Uuid) -> AppResult<()> {
        ensure_admin(actor)?;
        let hotel = self.uow.hotels().get(hotel_id).await?;

        let active = self
            .uow
            .reservations()
            .reservations_by_hotel(hotel_id)
            .await?
            .into_iter()
            .filter(|reservation| reservation.is_active())
            .count();
        if active > 0 {
            tracing::warn!("Refused to delete hotel {} with {} active reservations", hotel.name, active);
            return Err(AppError::precondition(
                "Cannot delete a hotel with active reservations",
            ));
        }

        let rooms = self.uow.rooms().rooms_by_hotel(hotel_id).await?;
        let mut changes = Changeset::new();
        for room in &rooms {
            changes.delete::<Room>(room.id);
        }
        changes.delete::<Hotel>(hotel_id);
        self.uow.commit(changes).await?;

        tracing::info!("Deleted hotel {} and {} rooms", hotel.name, rooms.len());
        Ok(())
    }
}
