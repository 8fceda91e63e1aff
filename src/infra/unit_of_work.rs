//! Unit of Work pattern implementation.
//!
//! Centralizes access to every repository and commits multi-entity changes
//! as one atomic [`Changeset`], so a reservation and its room never end up
//! half updated.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::repositories::{
    HotelRepository, NotificationRepository, PaymentRepository, Record, ReservationRepository,
    RoomRepository, UserRepository,
};
use super::store::{MemoryStore, RecordStore, SqlStore, WriteBatch};
use super::Database;
use crate::config::{Config, StoreBackend};
use crate::domain::{Hotel, Notification, Payment, Reservation, Room, User};
use crate::errors::AppResult;

/// Typed writes committed together.
#[derive(Debug, Default)]
pub struct Changeset {
    batch: WriteBatch,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an insert-or-replace
    pub fn put<R: Record>(&mut self, record: &R) -> AppResult<&mut Self> {
        self.batch.put(R::COLLECTION, record.to_document()?);
        Ok(self)
    }

    pub fn delete<R: Record>(&mut self, id: Uuid) -> &mut Self {
        self.batch.delete(R::COLLECTION, id.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn into_batch(self) -> WriteBatch {
        self.batch
    }
}

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and the atomic commit.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> &UserRepository;

    fn hotels(&self) -> &HotelRepository;

    fn rooms(&self) -> &RoomRepository;

    fn reservations(&self) -> &ReservationRepository;

    fn payments(&self) -> &PaymentRepository;

    fn notifications(&self) -> &NotificationRepository;

    /// Apply every staged write or none of them.
    async fn commit(&self, changes: Changeset) -> AppResult<()>;
}

/// Concrete implementation of UnitOfWork over a [`RecordStore`]
pub struct Persistence {
    store: Arc<dyn RecordStore>,
    users: UserRepository,
    hotels: HotelRepository,
    rooms: RoomRepository,
    reservations: ReservationRepository,
    payments: PaymentRepository,
    notifications: NotificationRepository,
}

impl Persistence {
    /// Open every collection on `store` and build the repositories.
    pub async fn open(store: Arc<dyn RecordStore>) -> AppResult<Self> {
        for spec in [
            User::collection_spec(),
            Hotel::collection_spec(),
            Room::collection_spec(),
            Reservation::collection_spec(),
            Payment::collection_spec(),
            Notification::collection_spec(),
        ] {
            store.open_collection(spec).await?;
        }

        Ok(Self {
            users: UserRepository::new(store.clone()),
            hotels: HotelRepository::new(store.clone()),
            rooms: RoomRepository::new(store.clone()),
            reservations: ReservationRepository::new(store.clone()),
            payments: PaymentRepository::new(store.clone()),
            notifications: NotificationRepository::new(store.clone()),
            store,
        })
    }

    /// Open the store selected by the configuration.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let store: Arc<dyn RecordStore> = match config.store_backend {
            StoreBackend::Sqlite => {
                let db = Database::connect(config).await?;
                Arc::new(SqlStore::new(db.get_connection()))
            }
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };
        tracing::debug!("Using {:?} store", config.store_backend);
        Self::open(store).await
    }

    /// Fresh in-memory persistence
    pub async fn in_memory() -> AppResult<Self> {
        Self::open(Arc::new(MemoryStore::new())).await
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> &UserRepository {
        &self.users
    }

    fn hotels(&self) -> &HotelRepository {
        &self.hotels
    }

    fn rooms(&self) -> &RoomRepository {
        &self.rooms
    }

    fn reservations(&self) -> &ReservationRepository {
        &self.reservations
    }

    fn payments(&self) -> &PaymentRepository {
        &self.payments
    }

    fn notifications(&self) -> &NotificationRepository {
        &self.notifications
    }

    async fn commit(&self, changes: Changeset) -> AppResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let writes = changes.len();
        match self.store.apply(changes.into_batch()).await {
            Ok(()) => {
                tracing::debug!("Committed {} writes", writes);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Commit of {} writes failed: {}", writes, e);
                Err(e)
            }
        }
    }
}
