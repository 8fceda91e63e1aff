//! Room service - Room board, housekeeping status and availability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::ensure_hotel_access;
use crate::config::{TITLE_CLEANING_REQUIRED, TITLE_MAINTENANCE_REQUIRED};
use crate::domain::{
    Hotel, NewRoom, Notification, NotificationKind, Room, RoomStatus, RoomUpdate, Stay, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{Changeset, ReadRepository, UnitOfWork, WriteRepository};

#[async_trait]
pub trait RoomService: Send + Sync {
    async fn rooms(&self, actor: &User, hotel_id: Uuid) -> AppResult<Vec<Room>>;

    async fn get_room(&self, actor: &User, room_id: Uuid) -> AppResult<Room>;

    async fn create_room(&self, actor: &User, hotel_id: Uuid, input: NewRoom) -> AppResult<Room>;

    /// Bulk insert; the hotel's room count rises in the same write
    async fn create_rooms(
        &self,
        actor: &User,
        hotel_id: Uuid,
        inputs: Vec<NewRoom>,
    ) -> AppResult<Vec<Room>>;

    /// Edit room attributes. Status is not editable here.
    async fn update_room(&self, actor: &User, room_id: Uuid, update: RoomUpdate) -> AppResult<Room>;

    /// Refused while the room has confirmed or checked-in reservations
    async fn delete_room(&self, actor: &User, room_id: Uuid) -> AppResult<()>;

    /// Staff-driven status change. Not checked against reservations.
    async fn set_room_status(
        &self,
        actor: &User,
        room_id: Uuid,
        status: RoomStatus,
    ) -> AppResult<Room>;

    /// Rooms bookable for `[check_in, check_out)`
    async fn available_rooms(
        &self,
        actor: &User,
        hotel_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> AppResult<Vec<Room>>;
}

pub struct RoomManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RoomManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn load(&self, actor: &User, room_id: Uuid) -> AppResult<Room> {
        let room = self.uow.rooms().get(room_id).await?;
        ensure_hotel_access(actor, room.hotel_id)?;
        Ok(room)
    }
}

fn status_notification(actor: &User, room: &Room) -> Option<Notification> {
    let (kind, title, message) = match room.status {
        RoomStatus::Dirty => (
            NotificationKind::CleaningRequired,
            TITLE_CLEANING_REQUIRED,
            format!("Room {} needs cleaning", room.number),
        ),
        RoomStatus::Maintenance => (
            NotificationKind::MaintenanceRequired,
            TITLE_MAINTENANCE_REQUIRED,
            format!("Room {} is out of service for maintenance", room.number),
        ),
        RoomStatus::Available | RoomStatus::Occupied => return None,
    };
    Some(Notification::new(actor.id, kind, title, message).for_room(room.id))
}

#[async_trait]
impl<U: UnitOfWork> RoomService for RoomManager<U> {
    async fn rooms(&self, actor: &User, hotel_id: Uuid) -> AppResult<Vec<Room>> {
        ensure_hotel_access(actor, hotel_id)?;
        self.uow.rooms().rooms_by_hotel(hotel_id).await
    }

    async fn get_room(&self, actor: &User, room_id: Uuid) -> AppResult<Room> {
        self.load(actor, room_id).await
    }

    async fn create_room(&self, actor: &User, hotel_id: Uuid, input: NewRoom) -> AppResult<Room> {
        self.create_rooms(actor, hotel_id, vec![input])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("Room insert returned nothing"))
    }

    async fn create_rooms(
        &self,
        actor: &User,
        hotel_id: Uuid,
        inputs: Vec<NewRoom>,
    ) -> AppResult<Vec<Room>> {
        ensure_hotel_access(actor, hotel_id)?;
        for input in &inputs {
            input.validate()?;
        }

        let rooms = self.uow.rooms().create_many(hotel_id, inputs).await?;
        tracing::info!("Added {} rooms to hotel {}", rooms.len(), hotel_id);
        Ok(rooms)
    }

    async fn update_room(&self, actor: &User, room_id: Uuid, update: RoomUpdate) -> AppResult<Room> {
        update.validate()?;
        let mut room = self.load(actor, room_id).await?;

        if let Some(number) = update.number.as_deref().map(str::trim) {
            let holder = self.uow.rooms().find_by_number(room.hotel_id, number).await?;
            if holder.is_some_and(|other| other.id != room.id) {
                return Err(AppError::conflict(format!("Room {} already exists", number)));
            }
        }

        room.apply(update);
        self.uow.rooms().save(&room).await?;
        Ok(room)
    }

    async fn delete_room(&self, actor: &User, room_id: Uuid) -> AppResult<()> {
        let room = self.load(actor, room_id).await?;

        if !self.uow.reservations().active_for_room(room_id).await?.is_empty() {
            tracing::warn!("Refused to delete room {} with active reservations", room.number);
            return Err(AppError::precondition(
                "Cannot delete a room with active reservations",
            ));
        }

        let mut changes = Changeset::new();
        changes.delete::<Room>(room.id);
        if let Some(mut hotel) = self.uow.hotels().find_by_id(room.hotel_id).await? {
            hotel.total_rooms = hotel.total_rooms.saturating_sub(1);
            changes.put::<Hotel>(&hotel)?;
        }
        self.uow.commit(changes).await?;

        tracing::info!("Deleted room {}", room.number);
        Ok(())
    }

    async fn set_room_status(
        &self,
        actor: &User,
        room_id: Uuid,
        status: RoomStatus,
    ) -> AppResult<Room> {
        let mut room = self.load(actor, room_id).await?;
        let previous = room.status;
        room.set_status(status, Utc::now());

        let mut changes = Changeset::new();
        changes.put(&room)?;
        if let Some(notification) = status_notification(actor, &room) {
            changes.put(&notification)?;
        }
        self.uow.commit(changes).await?;

        tracing::info!("Room {} status {} -> {}", room.number, previous, room.status);
        Ok(room)
    }

    async fn available_rooms(
        &self,
        actor: &User,
        hotel_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> AppResult<Vec<Room>> {
        ensure_hotel_access(actor, hotel_id)?;
        let stay = Stay::new(check_in, check_out)?;

        let rooms = self.uow.rooms().rooms_by_hotel(hotel_id).await?;
        let reservations = self.uow.reservations().reservations_by_hotel(hotel_id).await?;

        Ok(rooms
            .into_iter()
            .filter(|room| room.is_bookable())
            .filter(|room| {
                !reservations
                    .iter()
                    .any(|reservation| reservation.room_id == room.id && reservation.blocks(&stay))
            })
            .collect())
    }
}
