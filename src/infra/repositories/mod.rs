//! Repository layer - Data access abstraction
//!
//! One typed repository per entity kind over the shared [`RecordStore`].
//! Lookups that match nothing return empty collections; store failures are
//! passed through unchanged.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::infra::store::RecordStore;

mod base;
mod hotel_repository;
mod notification_repository;
mod payment_repository;
mod reservation_repository;
mod room_repository;
mod user_repository;

pub use base::{CrudRepository, DeleteRepository, ReadRepository, Record, WriteRepository};

pub type HotelRepository = Repository<crate::domain::Hotel>;
pub type RoomRepository = Repository<crate::domain::Room>;
pub type ReservationRepository = Repository<crate::domain::Reservation>;
pub type PaymentRepository = Repository<crate::domain::Payment>;
pub type NotificationRepository = Repository<crate::domain::Notification>;
pub type UserRepository = Repository<crate::domain::User>;

/// Typed access to the collection holding `R`
pub struct Repository<R> {
    store: Arc<dyn RecordStore>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Repository<R> {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }
}

impl<R: Record> ReadRepository<R> for Repository<R> {
    fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}

impl<R: Record> WriteRepository<R> for Repository<R> {
    fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}

impl<R: Record> DeleteRepository<R> for Repository<R> {
    fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}
