//! Front desk dashboard figures for one hotel.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::percentage;
use super::window::ReportWindow;
use crate::domain::{PaymentStatus, Reservation, ReservationStatus, Room, RoomStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatusCounts {
    pub available: usize,
    pub occupied: usize,
    pub dirty: usize,
    pub maintenance: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_rooms: usize,
    /// Rooms currently marked occupied
    pub occupancy_rate: f64,
    /// Paid reservations checking in this calendar month
    pub monthly_revenue: f64,
    pub today_check_ins: usize,
    pub today_check_outs: usize,
    pub room_status: RoomStatusCounts,
}

pub fn dashboard_stats(
    rooms: &[Room],
    reservations: &[Reservation],
    now: DateTime<Utc>,
) -> DashboardStats {
    let mut room_status = RoomStatusCounts::default();
    for room in rooms {
        match room.status {
            RoomStatus::Available => room_status.available += 1,
            RoomStatus::Occupied => room_status.occupied += 1,
            RoomStatus::Dirty => room_status.dirty += 1,
            RoomStatus::Maintenance => room_status.maintenance += 1,
        }
    }

    let today = now.date_naive();
    let month = ReportWindow::month_of(today);

    let monthly_revenue = reservations
        .iter()
        .filter(|reservation| reservation.payment_status == PaymentStatus::Paid)
        .filter(|reservation| month.contains(reservation.check_in))
        .map(|reservation| reservation.total_amount)
        .sum();

    let today_check_ins = reservations
        .iter()
        .filter(|reservation| reservation.reservation_status == ReservationStatus::Confirmed)
        .filter(|reservation| reservation.check_in.date_naive() == today)
        .count();
    let today_check_outs = reservations
        .iter()
        .filter(|reservation| reservation.reservation_status == ReservationStatus::CheckedIn)
        .filter(|reservation| reservation.check_out.date_naive() == today)
        .count();

    DashboardStats {
        total_rooms: rooms.len(),
        occupancy_rate: percentage(room_status.occupied as f64, rooms.len() as f64),
        monthly_revenue,
        today_check_ins,
        today_check_outs,
        room_status,
    }
}
