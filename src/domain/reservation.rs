//! Reservation entity, its two status machines and the stay interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::SECONDS_PER_DAY;
use crate::errors::{AppError, AppResult};

/// Half-open `[check_in, check_out)` interval a room is held for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

impl Stay {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> AppResult<Self> {
        if check_out <= check_in {
            return Err(AppError::validation("Check-out must be after check-in"));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> DateTime<Utc> {
        self.check_in
    }

    pub fn check_out(&self) -> DateTime<Utc> {
        self.check_out
    }

    /// Billable nights; a partial day counts as a full night.
    pub fn nights(&self) -> i64 {
        ceil_days((self.check_out - self.check_in).num_seconds())
    }

    pub fn overlaps(&self, other: &Stay) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Whole days of this stay falling inside `[start, end)`, partial days rounded up.
    pub fn overlap_days(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        let from = self.check_in.max(start);
        let to = self.check_out.min(end);
        if from < to {
            ceil_days((to - from).num_seconds())
        } else {
            0
        }
    }

    /// Whether the room is held at the given instant.
    pub fn covers(&self, at: DateTime<Utc>) -> bool {
        self.check_in <= at && at < self.check_out
    }
}

fn ceil_days(seconds: i64) -> i64 {
    (seconds + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl ReservationStatus {
    /// Confirmed and checked-in reservations hold their room.
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Confirmed | ReservationStatus::CheckedIn)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked-in",
            ReservationStatus::CheckedOut => "checked-out",
            ReservationStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Pending,
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub guest_phone: String,
    pub number_of_guests: u32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub reservation_status: ReservationStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_check_in: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_check_out: Option<DateTime<Utc>>,
}

impl Reservation {
    /// A freshly booked reservation: confirmed, payment pending.
    pub fn new(
        input: NewReservation,
        stay: Stay,
        nightly_price: f64,
        created_by: Uuid,
    ) -> Self {
        let total_amount = input
            .total_override
            .unwrap_or_else(|| stay.nights() as f64 * nightly_price);

        Self {
            id: Uuid::new_v4(),
            hotel_id: input.hotel_id,
            room_id: input.room_id,
            guest_name: input.guest_name.trim().to_string(),
            guest_email: input.guest_email.trim().to_lowercase(),
            guest_phone: input.guest_phone,
            number_of_guests: input.number_of_guests,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            total_amount,
            payment_status: PaymentStatus::Pending,
            reservation_status: ReservationStatus::Confirmed,
            created_by,
            created_at: Utc::now(),
            actual_check_in: None,
            actual_check_out: None,
        }
    }

    /// Interval view of the booked dates. Records written by other tools may
    /// carry inverted dates; those hold nothing and report `None`.
    pub fn stay(&self) -> Option<Stay> {
        Stay::new(self.check_in, self.check_out).ok()
    }

    pub fn is_active(&self) -> bool {
        self.reservation_status.is_active()
    }

    /// Whether this reservation keeps its room from being booked for `stay`.
    pub fn blocks(&self, stay: &Stay) -> bool {
        self.is_active() && self.stay().is_some_and(|own| own.overlaps(stay))
    }

    pub fn check_in(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        if self.reservation_status != ReservationStatus::Confirmed {
            return Err(AppError::precondition(format!(
                "Cannot check in a {} reservation",
                self.reservation_status
            )));
        }
        self.reservation_status = ReservationStatus::CheckedIn;
        self.actual_check_in = Some(at);
        Ok(())
    }

    /// Checkout is gated on full payment before anything else.
    pub fn check_out(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        if self.payment_status != PaymentStatus::Paid {
            return Err(AppError::precondition(
                "Cannot check out with incomplete payment",
            ));
        }
        if self.reservation_status != ReservationStatus::CheckedIn {
            return Err(AppError::precondition(format!(
                "Cannot check out a {} reservation",
                self.reservation_status
            )));
        }
        self.reservation_status = ReservationStatus::CheckedOut;
        self.actual_check_out = Some(at);
        Ok(())
    }

    pub fn cancel(&mut self) -> AppResult<()> {
        if self.reservation_status != ReservationStatus::Confirmed {
            return Err(AppError::precondition(format!(
                "Cannot cancel a {} reservation",
                self.reservation_status
            )));
        }
        self.reservation_status = ReservationStatus::Cancelled;
        Ok(())
    }

    /// Any recorded payment settles the reservation in full.
    pub fn mark_paid(&mut self) {
        self.payment_status = PaymentStatus::Paid;
    }

    /// Dates may change until the guest has left; the total follows the new nights.
    pub fn reschedule(&mut self, stay: Stay, nightly_price: f64) -> AppResult<()> {
        self.ensure_modifiable("change the dates of")?;
        self.check_in = stay.check_in();
        self.check_out = stay.check_out();
        self.total_amount = stay.nights() as f64 * nightly_price;
        Ok(())
    }

    pub fn ensure_modifiable(&self, action: &str) -> AppResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(AppError::precondition(format!(
                "Cannot {} a {} reservation",
                action, self.reservation_status
            )))
        }
    }

    pub fn apply_guest_details(&mut self, details: GuestDetails) {
        if let Some(name) = details.guest_name {
            self.guest_name = name.trim().to_string();
        }
        if let Some(email) = details.guest_email {
            self.guest_email = email.trim().to_lowercase();
        }
        if let Some(phone) = details.guest_phone {
            self.guest_phone = phone;
        }
        if let Some(guests) = details.number_of_guests {
            self.number_of_guests = guests;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReservation {
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    #[validate(length(min = 1, message = "Guest name is required"))]
    pub guest_name: String,
    #[validate(email(message = "A valid guest e-mail is required"))]
    pub guest_email: String,
    #[serde(default)]
    pub guest_phone: String,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub number_of_guests: u32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    /// Negotiated total replacing nights × nightly price
    #[validate(
        range(min = 0.0, message = "Total cannot be negative"),
        custom(function = "super::finite", message = "Total must be a finite amount")
    )]
    pub total_override: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GuestDetails {
    #[validate(length(min = 1, message = "Guest name is required"))]
    pub guest_name: Option<String>,
    #[validate(email(message = "A valid guest e-mail is required"))]
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub number_of_guests: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    fn reservation(check_in: u32, check_out: u32) -> Reservation {
        let stay = Stay::new(day(check_in), day(check_out)).unwrap();
        Reservation::new(
            NewReservation {
                hotel_id: Uuid::new_v4(),
                room_id: Uuid::new_v4(),
                guest_name: "Ana Gómez".to_string(),
                guest_email: "Ana@Example.com".to_string(),
                guest_phone: String::new(),
                number_of_guests: 2,
                check_in: day(check_in),
                check_out: day(check_out),
                total_override: None,
            },
            stay,
            100.0,
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_stay_rejects_empty_or_inverted_interval() {
        assert!(Stay::new(day(3), day(3)).is_err());
        assert!(Stay::new(day(4), day(3)).is_err());
    }

    #[test]
    fn test_partial_day_counts_as_night() {
        let stay = Stay::new(day(1), day(2) + Duration::hours(11)).unwrap();
        assert_eq!(stay.nights(), 2);
    }

    #[test]
    fn test_half_open_intervals_touching_do_not_overlap() {
        let first = Stay::new(day(1), day(3)).unwrap();
        let second = Stay::new(day(3), day(5)).unwrap();
        let third = Stay::new(day(2), day(4)).unwrap();

        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
        assert!(first.overlaps(&third));
        assert!(third.overlaps(&second));
    }

    #[test]
    fn test_overlap_days_clips_to_window() {
        let stay = Stay::new(day(1), day(10)).unwrap();
        assert_eq!(stay.overlap_days(day(5), day(7)), 2);
        assert_eq!(stay.overlap_days(day(10), day(12)), 0);
    }

    #[test]
    fn test_new_reservation_defaults() {
        let r = reservation(1, 3);
        assert_eq!(r.total_amount, 200.0);
        assert_eq!(r.payment_status, PaymentStatus::Pending);
        assert_eq!(r.reservation_status, ReservationStatus::Confirmed);
        assert_eq!(r.guest_email, "ana@example.com");
    }

    #[test]
    fn test_checkout_requires_payment_first() {
        let mut r = reservation(1, 3);
        r.check_in(day(1)).unwrap();

        let err = r.check_out(day(3)).unwrap_err();
        assert!(matches!(err, AppError::PreconditionFailed(_)));
        assert_eq!(r.reservation_status, ReservationStatus::CheckedIn);

        r.mark_paid();
        r.check_out(day(3)).unwrap();
        assert_eq!(r.reservation_status, ReservationStatus::CheckedOut);
        assert_eq!(r.actual_check_out, Some(day(3)));
    }

    #[test]
    fn test_transitions_only_move_forward() {
        let mut r = reservation(1, 3);
        r.check_in(day(1)).unwrap();
        assert!(r.check_in(day(1)).is_err());
        assert!(r.cancel().is_err());

        r.mark_paid();
        r.check_out(day(3)).unwrap();
        assert!(r.reschedule(Stay::new(day(1), day(4)).unwrap(), 100.0).is_err());
    }

    #[test]
    fn test_cancelled_reservation_releases_room() {
        let mut r = reservation(1, 3);
        let probe = Stay::new(day(2), day(4)).unwrap();
        assert!(r.blocks(&probe));

        r.cancel().unwrap();
        assert!(!r.blocks(&probe));
    }

    #[test]
    fn test_reschedule_recomputes_total() {
        let mut r = reservation(1, 3);
        r.reschedule(Stay::new(day(1), day(6)).unwrap(), 120.0).unwrap();
        assert_eq!(r.total_amount, 600.0);
        assert_eq!(r.check_out, day(6));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(ReservationStatus::CheckedIn).unwrap(),
            serde_json::json!("checked-in")
        );
        assert_eq!(ReservationStatus::CheckedOut.to_string(), "checked-out");
    }
}
