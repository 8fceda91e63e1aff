//! Domain layer - Core business entities and logic
//!
//! Entity records for hotels, rooms, reservations, payments, notifications
//! and users, with the status machines that govern rooms and reservations.
//! Nothing here touches storage.

pub mod hotel;
pub mod notification;
pub mod password;
pub mod payment;
pub mod reservation;
pub mod room;
pub mod user;

pub use hotel::{Hotel, HotelUpdate, NewHotel};
pub use notification::{Notification, NotificationKind};
pub use password::Password;
pub use payment::{NewPayment, Payment, PaymentRecordStatus};
pub use reservation::{
    GuestDetails, NewReservation, PaymentStatus, Reservation, ReservationStatus, Stay,
};
pub use room::{NewRoom, Room, RoomStatus, RoomType, RoomUpdate};
pub use user::{normalize_email, NewUser, User, UserProfile, UserRole};

use validator::ValidationError;

/// Rejects NaN and infinite money amounts, which `range` lets through.
pub(crate) fn finite(value: impl std::borrow::Borrow<f64>) -> Result<(), ValidationError> {
    if value.borrow().is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}
