//! Occupancy over a window, measured in room-nights.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::window::{midnight, ReportWindow};
use super::percentage;
use crate::domain::{Reservation, ReservationStatus, Room};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOccupancy {
    pub date: NaiveDate,
    pub occupied_rooms: usize,
    pub total_rooms: usize,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    pub window: ReportWindow,
    pub total_rooms: usize,
    pub total_days: i64,
    pub total_room_nights: i64,
    pub occupied_room_nights: i64,
    pub occupancy_rate: f64,
    pub total_reservations: usize,
    pub daily_occupancy: Vec<DailyOccupancy>,
}

/// Share of the fleet's room-nights held by non-cancelled reservations.
///
/// Each reservation contributes its stay clipped to the window, partial days
/// rounded up. Reservations on rooms outside `rooms` are ignored.
pub fn occupancy_report(
    rooms: &[Room],
    reservations: &[Reservation],
    window: &ReportWindow,
) -> OccupancyReport {
    let (start, end) = (window.start_instant(), window.end_instant());
    let room_ids: HashSet<Uuid> = rooms.iter().map(|room| room.id).collect();

    let counted: Vec<&Reservation> = reservations
        .iter()
        .filter(|reservation| reservation.reservation_status != ReservationStatus::Cancelled)
        .filter(|reservation| room_ids.contains(&reservation.room_id))
        .filter(|reservation| reservation.check_in < end && reservation.check_out > start)
        .collect();

    let occupied_room_nights: i64 = counted
        .iter()
        .filter_map(|reservation| reservation.stay())
        .map(|stay| stay.overlap_days(start, end))
        .sum();

    let total_days = window.day_count();
    let total_room_nights = rooms.len() as i64 * total_days;

    let daily_occupancy = window
        .days()
        .map(|date| {
            let at = midnight(date);
            let occupied: HashSet<Uuid> = counted
                .iter()
                .filter(|reservation| reservation.stay().is_some_and(|stay| stay.covers(at)))
                .map(|reservation| reservation.room_id)
                .collect();

            DailyOccupancy {
                date,
                occupied_rooms: occupied.len(),
                total_rooms: rooms.len(),
                occupancy_rate: percentage(occupied.len() as f64, rooms.len() as f64),
            }
        })
        .collect();

    OccupancyReport {
        window: *window,
        total_rooms: rooms.len(),
        total_days,
        total_room_nights,
        occupied_room_nights,
        occupancy_rate: percentage(occupied_room_nights as f64, total_room_nights as f64),
        total_reservations: counted.len(),
        daily_occupancy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomType;
    use crate::reports::fixtures::{at, booking, day, room};

    #[test]
    fn test_two_nights_of_two_rooms_over_two_days_is_half() {
        let hotel_id = Uuid::new_v4();
        let rooms = vec![
            room(hotel_id, "101", RoomType::Standard, 100.0),
            room(hotel_id, "102", RoomType::Standard, 100.0),
        ];
        let reservations = vec![booking(&rooms[0], at(1, 15), at(3, 11))];
        let window = ReportWindow::new(day(1), day(3)).unwrap();

        let report = occupancy_report(&rooms, &reservations, &window);

        assert_eq!(report.total_days, 2);
        assert_eq!(report.total_room_nights, 4);
        assert_eq!(report.occupied_room_nights, 2);
        assert_eq!(report.occupancy_rate, 50.0);
        assert_eq!(report.total_reservations, 1);
    }

    #[test]
    fn test_cancelled_reservations_are_excluded() {
        let hotel_id = Uuid::new_v4();
        let rooms = vec![room(hotel_id, "101", RoomType::Standard, 100.0)];
        let mut cancelled = booking(&rooms[0], at(1, 15), at(3, 11));
        cancelled.cancel().unwrap();
        let window = ReportWindow::new(day(1), day(3)).unwrap();

        let report = occupancy_report(&rooms, &[cancelled], &window);

        assert_eq!(report.occupied_room_nights, 0);
        assert_eq!(report.occupancy_rate, 0.0);
        assert_eq!(report.total_reservations, 0);
    }

    #[test]
    fn test_stays_are_clipped_to_the_window() {
        let hotel_id = Uuid::new_v4();
        let rooms = vec![room(hotel_id, "101", RoomType::Standard, 100.0)];
        let long_stay = booking(&rooms[0], at(1, 0), at(20, 0));
        let window = ReportWindow::new(day(5), day(9)).unwrap();

        let report = occupancy_report(&rooms, &[long_stay], &window);

        assert_eq!(report.occupied_room_nights, 4);
        assert_eq!(report.occupancy_rate, 100.0);
    }

    #[test]
    fn test_daily_breakdown_counts_distinct_rooms() {
        let hotel_id = Uuid::new_v4();
        let rooms = vec![
            room(hotel_id, "101", RoomType::Standard, 100.0),
            room(hotel_id, "102", RoomType::Standard, 100.0),
        ];
        let reservations = vec![booking(&rooms[0], at(1, 15), at(3, 11))];
        let window = ReportWindow::new(day(1), day(3)).unwrap();

        let report = occupancy_report(&rooms, &reservations, &window);

        let occupied: Vec<usize> = report
            .daily_occupancy
            .iter()
            .map(|entry| entry.occupied_rooms)
            .collect();
        assert_eq!(occupied, vec![0, 1, 1]);
        assert_eq!(report.daily_occupancy[1].occupancy_rate, 50.0);
    }

    #[test]
    fn test_empty_fleet_reports_zero() {
        let window = ReportWindow::new(day(1), day(3)).unwrap();

        let report = occupancy_report(&[], &[], &window);

        assert_eq!(report.occupancy_rate, 0.0);
        assert!(report.daily_occupancy.iter().all(|entry| entry.occupancy_rate == 0.0));
    }
}
