//! Reports - Aggregations over a hotel snapshot
//!
//! Every function here is pure: it takes the rooms, reservations and payments
//! already loaded for one hotel and returns a serializable summary. Loading
//! and access checks live in `services::report_service`.

mod dashboard;
mod occupancy;
mod payments;
mod performance;
mod revenue;
mod window;

pub use dashboard::{dashboard_stats, DashboardStats, RoomStatusCounts};
pub use occupancy::{occupancy_report, DailyOccupancy, OccupancyReport};
pub use payments::{payment_report, DailyPayments, MethodTotal, PaymentReport};
pub use performance::{room_performance_report, RoomPerformance, RoomPerformanceReport};
pub use revenue::{revenue_report, DailyRevenue, RevenueReport, RoomTypeRevenue};
pub use window::ReportWindow;

use crate::config::{MAX_OCCUPANCY_RATE, RATE_DECIMALS};

pub(crate) fn round_rate(value: f64) -> f64 {
    let factor = 10f64.powi(RATE_DECIMALS);
    (value * factor).round() / factor
}

/// `part / whole` as a percentage in `[0, 100]`; zero when `whole` is empty.
pub(crate) fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    round_rate((part / whole * 100.0).clamp(0.0, MAX_OCCUPANCY_RATE))
}


#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    use crate::domain::{NewReservation, NewRoom, Reservation, Room, RoomType, Stay};

    pub fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    pub fn at(d: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, hour, 0, 0).unwrap()
    }

    pub fn room(hotel_id: Uuid, number: &str, room_type: RoomType, price: f64) -> Room {
        Room::new(
            hotel_id,
            NewRoom {
                number: number.to_string(),
                room_type,
                capacity: 2,
                nightly_price: price,
                amenities: Default::default(),
            },
        )
    }

    pub fn booking(room: &Room, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Reservation {
        let input = NewReservation {
            hotel_id: room.hotel_id,
            room_id: room.id,
            guest_name: "Ana Torres".to_string(),
            guest_email: "ana@example.com".to_string(),
            guest_phone: String::new(),
            number_of_guests: 1,
            check_in,
            check_out,
            total_override: None,
        };
        let stay = Stay::new(check_in, check_out).unwrap();
        Reservation::new(input, stay, room.nightly_price, Uuid::nil())
    }
}
