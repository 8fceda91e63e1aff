//! Revenue by payment status.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::window::ReportWindow;
use crate::domain::{PaymentStatus, Reservation, ReservationStatus, Room, RoomType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
    pub reservations: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeRevenue {
    pub revenue: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub window: ReportWindow,
    /// Realized: paid reservations
    pub total_revenue: f64,
    pub pending_revenue: f64,
    /// Unpaid reservations
    pub potential_revenue: f64,
    pub total_reservations: usize,
    pub paid_reservations: usize,
    pub pending_reservations: usize,
    pub unpaid_reservations: usize,
    pub average_reservation_value: f64,
    pub daily_revenue: Vec<DailyRevenue>,
    pub revenue_by_room_type: BTreeMap<RoomType, RoomTypeRevenue>,
}

/// Reservations checking in during the window, split by payment status.
/// Cancelled reservations are left out; `rooms` resolves each reservation's room type.
pub fn revenue_report(
    rooms: &[Room],
    reservations: &[Reservation],
    window: &ReportWindow,
) -> RevenueReport {
    let in_window: Vec<&Reservation> = reservations
        .iter()
        .filter(|reservation| reservation.reservation_status != ReservationStatus::Cancelled)
        .filter(|reservation| window.contains(reservation.check_in))
        .collect();

    let with_status = |status: PaymentStatus| -> Vec<&Reservation> {
        in_window
            .iter()
            .copied()
            .filter(|reservation| reservation.payment_status == status)
            .collect()
    };
    let paid = with_status(PaymentStatus::Paid);
    let pending = with_status(PaymentStatus::Pending);
    let unpaid = with_status(PaymentStatus::Unpaid);

    let total_revenue = sum(&paid);
    let average_reservation_value = if paid.is_empty() {
        0.0
    } else {
        total_revenue / paid.len() as f64
    };

    let daily_revenue = window
        .days()
        .map(|date| {
            let booked: Vec<&Reservation> = paid
                .iter()
                .copied()
                .filter(|reservation| reservation.check_in.date_naive() == date)
                .collect();
            DailyRevenue {
                date,
                revenue: sum(&booked),
                reservations: booked.len(),
            }
        })
        .collect();

    let room_types: HashMap<Uuid, RoomType> =
        rooms.iter().map(|room| (room.id, room.room_type)).collect();
    let mut revenue_by_room_type: BTreeMap<RoomType, RoomTypeRevenue> = BTreeMap::new();
    for reservation in &paid {
        let room_type = room_types
            .get(&reservation.room_id)
            .copied()
            .unwrap_or(RoomType::Standard);
        let entry = revenue_by_room_type.entry(room_type).or_default();
        entry.revenue += reservation.total_amount;
        entry.count += 1;
    }

    RevenueReport {
        window: *window,
        total_revenue,
        pending_revenue: sum(&pending),
        potential_revenue: sum(&unpaid),
        total_reservations: in_window.len(),
        paid_reservations: paid.len(),
        pending_reservations: pending.len(),
        unpaid_reservations: unpaid.len(),
        average_reservation_value,
        daily_revenue,
        revenue_by_room_type,
    }
}

fn sum(reservations: &[&Reservation]) -> f64 {
    reservations.iter().map(|reservation| reservation.total_amount).sum()
}
