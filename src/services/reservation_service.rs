//! Reservation service - The reservation lifecycle.
//!
//! Every transition that touches more than one record (reservation, room,
//! payment, notification) is staged in one `Changeset` and committed
//! atomically, so a failed write never leaves a checked-in guest in an
//! available room.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::ensure_hotel_access;
use crate::config::{
    Config, TITLE_CHECK_IN, TITLE_CHECK_OUT, TITLE_PAYMENT_RECEIVED, TITLE_RESERVATION_CANCELLED,
    TITLE_RESERVATION_CREATED,
};
use crate::domain::{
    GuestDetails, NewPayment, NewReservation, Notification, NotificationKind, Payment,
    Reservation, ReservationStatus, Room, RoomStatus, Stay, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{Changeset, ReadRepository, UnitOfWork, WriteRepository};

#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Book a room. Rejects rooms under maintenance and overlapping bookings.
    async fn create_reservation(&self, actor: &User, input: NewReservation)
        -> AppResult<Reservation>;

    async fn get_reservation(&self, actor: &User, reservation_id: Uuid) -> AppResult<Reservation>;

    async fn reservations_for_hotel(&self, actor: &User, hotel_id: Uuid)
        -> AppResult<Vec<Reservation>>;

    /// Reservations under a guest e-mail that the actor may see
    async fn reservations_for_guest(&self, actor: &User, email: &str)
        -> AppResult<Vec<Reservation>>;

    async fn update_guest(
        &self,
        actor: &User,
        reservation_id: Uuid,
        details: GuestDetails,
    ) -> AppResult<Reservation>;

    /// confirmed -> checked-in; the room becomes occupied
    async fn check_in(&self, actor: &User, reservation_id: Uuid) -> AppResult<Reservation>;

    /// checked-in -> checked-out once paid; the room becomes dirty
    async fn check_out(&self, actor: &User, reservation_id: Uuid) -> AppResult<Reservation>;

    /// Store a payment and settle the reservation in full
    async fn record_payment(
        &self,
        actor: &User,
        reservation_id: Uuid,
        input: NewPayment,
    ) -> AppResult<Payment>;

    async fn payments_for(&self, actor: &User, reservation_id: Uuid) -> AppResult<Vec<Payment>>;

    /// Change both dates; the total follows the new number of nights
    async fn reschedule(
        &self,
        actor: &User,
        reservation_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> AppResult<Reservation>;

    /// Move the check-out date, keeping check-in
    async fn extend_stay(
        &self,
        actor: &User,
        reservation_id: Uuid,
        check_out: DateTime<Utc>,
    ) -> AppResult<Reservation>;

    /// Relocate to another room of the same hotel
    async fn move_reservation(
        &self,
        actor: &User,
        reservation_id: Uuid,
        room_id: Uuid,
    ) -> AppResult<Reservation>;

    /// confirmed -> cancelled
    async fn cancel_reservation(&self, actor: &User, reservation_id: Uuid)
        -> AppResult<Reservation>;
}

pub struct ReservationManager<U: UnitOfWork> {
    uow: Arc<U>,
    default_payment_method: String,
}

impl<U: UnitOfWork> ReservationManager<U> {
    pub fn new(uow: Arc<U>, config: &Config) -> Self {
        Self {
            uow,
            default_payment_method: config.default_payment_method.clone(),
        }
    }

    async fn load(&self, actor: &User, reservation_id: Uuid) -> AppResult<Reservation> {
        let reservation = self.uow.reservations().get(reservation_id).await?;
        ensure_hotel_access(actor, reservation.hotel_id)?;
        Ok(reservation)
    }

    /// Fail with `Conflict` when another active booking holds the room.
    async fn ensure_free(&self, room: &Room, stay: &Stay, exclude: Option<Uuid>) -> AppResult<()> {
        let clashes = self
            .uow
            .reservations()
            .conflicting(room.id, stay, exclude)
            .await?;

        if clashes.is_empty() {
            Ok(())
        } else {
            tracing::warn!(
                "Room {} already booked between {} and {}",
                room.number,
                stay.check_in(),
                stay.check_out()
            );
            Err(AppError::conflict(format!(
                "Room {} is already booked for those dates",
                room.number
            )))
        }
    }

    async fn change_dates(
        &self,
        actor: &User,
        mut reservation: Reservation,
        stay: Stay,
    ) -> AppResult<Reservation> {
        reservation.ensure_modifiable("change the dates of")?;
        let room = self.uow.rooms().get(reservation.room_id).await?;
        self.ensure_free(&room, &stay, Some(reservation.id)).await?;

        reservation.reschedule(stay, room.nightly_price)?;
        self.uow.reservations().save(&reservation).await?;

        tracing::info!(
            "{} rescheduled reservation {} to {} nights",
            actor.email,
            reservation.id,
            stay.nights()
        );
        Ok(reservation)
    }
}

fn ensure_capacity(room: &Room, guests: u32) -> AppResult<()> {
    if guests > room.capacity {
        return Err(AppError::validation(format!(
            "Room {} holds at most {} guests",
            room.number, room.capacity
        )));
    }
    Ok(())
}

fn notify(
    actor: &User,
    kind: NotificationKind,
    title: &str,
    reservation: &Reservation,
    message: String,
) -> Notification {
    Notification::new(actor.id, kind, title, message)
        .for_reservation(reservation.id)
        .for_room(reservation.room_id)
}

fn rejected(reservation_id: Uuid) -> impl FnOnce(&AppError) {
    move |e| tracing::warn!("Reservation {} transition rejected: {}", reservation_id, e)
}

#[async_trait]
impl<U: UnitOfWork> ReservationService for ReservationManager<U> {
    async fn create_reservation(
        &self,
        actor: &User,
        input: NewReservation,
    ) -> AppResult<Reservation> {
        input.validate()?;
        ensure_hotel_access(actor, input.hotel_id)?;

        let room = self.uow.rooms().get(input.room_id).await?;
        if room.hotel_id != input.hotel_id {
            return Err(AppError::validation("Room does not belong to this hotel"));
        }
        if !room.is_bookable() {
            return Err(AppError::conflict(format!(
                "Room {} is under maintenance",
                room.number
            )));
        }
        ensure_capacity(&room, input.number_of_guests)?;

        let stay = Stay::new(input.check_in, input.check_out)?;
        self.ensure_free(&room, &stay, None).await?;

        let reservation = Reservation::new(input, stay, room.nightly_price, actor.id);
        let notification = notify(
            actor,
            NotificationKind::ReservationCreated,
            TITLE_RESERVATION_CREATED,
            &reservation,
            format!("Reservation created for {}", reservation.guest_name),
        );

        let mut changes = Changeset::new();
        changes.put(&reservation)?.put(&notification)?;
        self.uow.commit(changes).await?;

        tracing::info!(
            "Reservation {} created for room {} ({} nights, total {})",
            reservation.id,
            room.number,
            stay.nights(),
            reservation.total_amount
        );
        Ok(reservation)
    }

    async fn get_reservation(&self, actor: &User, reservation_id: Uuid) -> AppResult<Reservation> {
        self.load(actor, reservation_id).await
    }

    async fn reservations_for_hotel(
        &self,
        actor: &User,
        hotel_id: Uuid,
    ) -> AppResult<Vec<Reservation>> {
        ensure_hotel_access(actor, hotel_id)?;
        self.uow.reservations().reservations_by_hotel(hotel_id).await
    }

    async fn reservations_for_guest(
        &self,
        actor: &User,
        email: &str,
    ) -> AppResult<Vec<Reservation>> {
        Ok(self
            .uow
            .reservations()
            .reservations_by_guest(email)
            .await?
            .into_iter()
            .filter(|reservation| actor.can_access_hotel(reservation.hotel_id))
            .collect())
    }

    async fn update_guest(
        &self,
        actor: &User,
        reservation_id: Uuid,
        details: GuestDetails,
    ) -> AppResult<Reservation> {
        details.validate()?;
        let mut reservation = self.load(actor, reservation_id).await?;
        reservation.ensure_modifiable("edit")?;

        if let Some(guests) = details.number_of_guests {
            let room = self.uow.rooms().get(reservation.room_id).await?;
            ensure_capacity(&room, guests)?;
        }

        reservation.apply_guest_details(details);
        self.uow.reservations().save(&reservation).await?;
        Ok(reservation)
    }

    async fn check_in(&self, actor: &User, reservation_id: Uuid) -> AppResult<Reservation> {
        let mut reservation = self.load(actor, reservation_id).await?;
        let mut room = self.uow.rooms().get(reservation.room_id).await?;
        let now = Utc::now();

        reservation
            .check_in(now)
            .inspect_err(rejected(reservation_id))?;
        room.set_status(RoomStatus::Occupied, now);

        let notification = notify(
            actor,
            NotificationKind::CheckIn,
            TITLE_CHECK_IN,
            &reservation,
            format!("Check-in completed for {}", reservation.guest_name),
        );

        let mut changes = Changeset::new();
        changes.put(&reservation)?.put(&room)?.put(&notification)?;
        self.uow.commit(changes).await?;

        tracing::info!("Checked in {} to room {}", reservation.guest_name, room.number);
        Ok(reservation)
    }

    async fn check_out(&self, actor: &User, reservation_id: Uuid) -> AppResult<Reservation> {
        let mut reservation = self.load(actor, reservation_id).await?;
        let mut room = self.uow.rooms().get(reservation.room_id).await?;
        let now = Utc::now();

        reservation
            .check_out(now)
            .inspect_err(rejected(reservation_id))?;
        room.set_status(RoomStatus::Dirty, now);

        let notification = notify(
            actor,
            NotificationKind::CheckOut,
            TITLE_CHECK_OUT,
            &reservation,
            format!("Check-out completed for {}", reservation.guest_name),
        );

        let mut changes = Changeset::new();
        changes.put(&reservation)?.put(&room)?.put(&notification)?;
        self.uow.commit(changes).await?;

        tracing::info!("Checked out {} from room {}", reservation.guest_name, room.number);
        Ok(reservation)
    }

    async fn record_payment(
        &self,
        actor: &User,
        reservation_id: Uuid,
        input: NewPayment,
    ) -> AppResult<Payment> {
        input.validate()?;
        let mut reservation = self.load(actor, reservation_id).await?;

        let method = input
            .method
            .filter(|method| !method.trim().is_empty())
            .unwrap_or_else(|| self.default_payment_method.clone());
        let payment = Payment::completed(reservation.id, input.amount, method, actor.id);
        reservation.mark_paid();

        let notification = notify(
            actor,
            NotificationKind::PaymentReceived,
            TITLE_PAYMENT_RECEIVED,
            &reservation,
            format!(
                "Payment of {} processed for {}",
                payment.amount, reservation.guest_name
            ),
        );

        let mut changes = Changeset::new();
        changes
            .put(&payment)?
            .put(&reservation)?
            .put(&notification)?;
        self.uow.commit(changes).await?;

        tracing::info!(
            "Payment of {} ({}) recorded for reservation {}",
            payment.amount,
            payment.method,
            reservation.id
        );
        Ok(payment)
    }

    async fn payments_for(&self, actor: &User, reservation_id: Uuid) -> AppResult<Vec<Payment>> {
        let reservation = self.load(actor, reservation_id).await?;
        self.uow
            .payments()
            .payments_by_reservation(reservation.id)
            .await
    }

    async fn reschedule(
        &self,
        actor: &User,
        reservation_id: Uuid,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        let reservation = self.load(actor, reservation_id).await?;
        let stay = Stay::new(check_in, check_out)?;
        self.change_dates(actor, reservation, stay).await
    }

    async fn extend_stay(
        &self,
        actor: &User,
        reservation_id: Uuid,
        check_out: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        let reservation = self.load(actor, reservation_id).await?;
        let stay = Stay::new(reservation.check_in, check_out)?;
        self.change_dates(actor, reservation, stay).await
    }

    async fn move_reservation(
        &self,
        actor: &User,
        reservation_id: Uuid,
        room_id: Uuid,
    ) -> AppResult<Reservation> {
        let mut reservation = self.load(actor, reservation_id).await?;
        reservation.ensure_modifiable("move")?;

        if reservation.room_id == room_id {
            return Err(AppError::validation("Reservation is already in that room"));
        }

        let mut target = self.uow.rooms().get(room_id).await?;
        if target.hotel_id != reservation.hotel_id {
            return Err(AppError::validation("Room does not belong to this hotel"));
        }
        if !target.is_bookable() {
            return Err(AppError::conflict(format!(
                "Room {} is under maintenance",
                target.number
            )));
        }
        ensure_capacity(&target, reservation.number_of_guests)?;

        let stay = reservation
            .stay()
            .ok_or_else(|| AppError::validation("Reservation has invalid dates"))?;
        self.ensure_free(&target, &stay, Some(reservation.id)).await?;

        let mut changes = Changeset::new();
        if reservation.reservation_status == ReservationStatus::CheckedIn {
            let now = Utc::now();
            if let Some(mut previous) = self.uow.rooms().find_by_id(reservation.room_id).await? {
                previous.set_status(RoomStatus::Dirty, now);
                changes.put(&previous)?;
            }
            target.set_status(RoomStatus::Occupied, now);
            changes.put(&target)?;
        }

        let from = reservation.room_id;
        reservation.room_id = target.id;
        changes.put(&reservation)?;
        self.uow.commit(changes).await?;

        tracing::info!(
            "Moved reservation {} from room {} to room {}",
            reservation.id,
            from,
            target.number
        );
        Ok(reservation)
    }

    async fn cancel_reservation(
        &self,
        actor: &User,
        reservation_id: Uuid,
    ) -> AppResult<Reservation> {
        let mut reservation = self.load(actor, reservation_id).await?;
        reservation
            .cancel()
            .inspect_err(rejected(reservation_id))?;

        let notification = notify(
            actor,
            NotificationKind::ReservationCancelled,
            TITLE_RESERVATION_CANCELLED,
            &reservation,
            format!("Reservation for {} cancelled", reservation.guest_name),
        );

        let mut changes = Changeset::new();
        changes.put(&reservation)?.put(&notification)?;
        self.uow.commit(changes).await?;

        tracing::info!("Cancelled reservation {}", reservation.id);
        Ok(reservation)
    }
}
