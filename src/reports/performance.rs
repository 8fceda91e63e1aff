//! Per-room performance ranking.

use serde::Serialize;

use super::window::ReportWindow;
use super::{percentage, round_rate};
use crate::domain::{PaymentStatus, Reservation, ReservationStatus, Room};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPerformance {
    pub room: Room,
    pub total_reservations: usize,
    pub total_revenue: f64,
    pub occupied_days: i64,
    pub occupancy_rate: f64,
    /// Paid revenue per occupied day
    pub average_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPerformanceReport {
    pub window: ReportWindow,
    /// Highest revenue first
    pub room_performance: Vec<RoomPerformance>,
    pub total_rooms: usize,
    pub average_occupancy: f64,
    pub total_revenue: f64,
}

pub fn room_performance_report(
    rooms: &[Room],
    reservations: &[Reservation],
    window: &ReportWindow,
) -> RoomPerformanceReport {
    let (start, end) = (window.start_instant(), window.end_instant());
    let total_days = window.day_count();

    let mut room_performance: Vec<RoomPerformance> = rooms
        .iter()
        .map(|room| {
            let booked: Vec<&Reservation> = reservations
                .iter()
                .filter(|reservation| reservation.room_id == room.id)
                .filter(|reservation| reservation.reservation_status != ReservationStatus::Cancelled)
                .filter(|reservation| window.contains(reservation.check_in))
                .collect();

            let (paid_count, total_revenue) = booked
                .iter()
                .filter(|reservation| reservation.payment_status == PaymentStatus::Paid)
                .fold((0usize, 0.0), |(count, revenue), reservation| {
                    (count + 1, revenue + reservation.total_amount)
                });

            let occupied_days: i64 = booked
                .iter()
                .filter_map(|reservation| reservation.stay())
                .map(|stay| stay.overlap_days(start, end))
                .sum();

            let average_rate = if paid_count > 0 && occupied_days > 0 {
                round_rate(total_revenue / occupied_days as f64)
            } else {
                0.0
            };

            RoomPerformance {
                room: room.clone(),
                total_reservations: booked.len(),
                total_revenue,
                occupied_days,
                occupancy_rate: percentage(occupied_days as f64, total_days as f64),
                average_rate,
            }
        })
        .collect();

    room_performance.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));

    let average_occupancy = if room_performance.is_empty() {
        0.0
    } else {
        let sum: f64 = room_performance.iter().map(|entry| entry.occupancy_rate).sum();
        round_rate(sum / room_performance.len() as f64)
    };
    let total_revenue = room_performance.iter().map(|entry| entry.total_revenue).sum();

    RoomPerformanceReport {
        window: *window,
        room_performance,
        total_rooms: rooms.len(),
        average_occupancy,
        total_revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomType;
    use crate::reports::fixtures::{at, booking, day, room};
    use uuid::Uuid;

    #[test]
    fn test_rooms_ranked_by_revenue() {
        let hotel_id = Uuid::new_v4();
        let cheap = room(hotel_id, "101", RoomType::Standard, 100.0);
        let suite = room(hotel_id, "102", RoomType::Suite, 300.0);

        let mut cheap_stay = booking(&cheap, at(1, 0), at(3, 0));
        cheap_stay.mark_paid();
        let mut suite_stay = booking(&suite, at(1, 0), at(2, 0));
        suite_stay.mark_paid();
        let rooms = vec![cheap.clone(), suite.clone()];
        let window = ReportWindow::new(day(1), day(5)).unwrap();

        let report = room_performance_report(&rooms, &[cheap_stay, suite_stay], &window);

        assert_eq!(report.room_performance[0].room.id, suite.id);
        assert_eq!(report.room_performance[0].total_revenue, 300.0);
        assert_eq!(report.room_performance[0].occupancy_rate, 25.0);
        assert_eq!(report.room_performance[1].room.id, cheap.id);
        assert_eq!(report.room_performance[1].occupied_days, 2);
        assert_eq!(report.room_performance[1].average_rate, 100.0);
        assert_eq!(report.total_revenue, 500.0);
        assert_eq!(report.average_occupancy, 37.5);
    }

    #[test]
    fn test_unpaid_stays_count_toward_occupancy_only() {
        let hotel_id = Uuid::new_v4();
        let standard = room(hotel_id, "101", RoomType::Standard, 100.0);
        let pending = booking(&standard, at(1, 0), at(3, 0));
        let window = ReportWindow::new(day(1), day(5)).unwrap();

        let report = room_performance_report(&[standard], &[pending], &window);

        let entry = &report.room_performance[0];
        assert_eq!(entry.total_reservations, 1);
        assert_eq!(entry.total_revenue, 0.0);
        assert_eq!(entry.occupancy_rate, 50.0);
        assert_eq!(entry.average_rate, 0.0);
    }

    #[test]
    fn test_no_rooms_yields_empty_report() {
        let window = ReportWindow::new(day(1), day(5)).unwrap();

        let report = room_performance_report(&[], &[], &window);

        assert!(report.room_performance.is_empty());
        assert_eq!(report.average_occupancy, 0.0);
    }
}
