//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! Every service reaches storage through the Unit of Work, and every
//! operation touching more than one record commits a single `Changeset`.

mod auth_service;
pub mod container;
mod hotel_service;
mod notification_service;
mod report_service;
mod reservation_service;
mod room_service;

use uuid::Uuid;

use crate::domain::User;
use crate::errors::{AppError, AppResult};

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use hotel_service::{HotelManager, HotelService};
pub use notification_service::{NotificationManager, NotificationService};
pub use report_service::{ReportManager, ReportService};
pub use reservation_service::{ReservationManager, ReservationService};
pub use room_service::{RoomManager, RoomService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;

/// Staff may only touch their own hotel; admins may touch any.
pub(crate) fn ensure_hotel_access(actor: &User, hotel_id: Uuid) -> AppResult<()> {
    if actor.can_access_hotel(hotel_id) {
        Ok(())
    } else {
        tracing::warn!("{} denied access to hotel {}", actor.email, hotel_id);
        Err(AppError::Forbidden)
    }
}

pub(crate) fn ensure_admin(actor: &User) -> AppResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
