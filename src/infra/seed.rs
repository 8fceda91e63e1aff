//! First-run seed data.
//!
//! Creates the administrator and a front desk account, the two default
//! hotels with their rooms, and a handful of sample reservations around
//! today. Seeding is skipped once any user exists.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::repositories::{ReadRepository, WriteRepository};
use super::unit_of_work::{Changeset, UnitOfWork};
use crate::config::{
    Config, CHECK_IN_HOUR, CHECK_OUT_HOUR, DEFAULT_ADMIN_NAME, DEFAULT_STAFF_EMAIL,
    DEFAULT_STAFF_NAME, DEFAULT_STAFF_PASSWORD,
};
use crate::domain::{
    Hotel, NewHotel, NewReservation, NewRoom, Password, Payment, PaymentStatus, Reservation,
    ReservationStatus, Room, RoomStatus, RoomType, Stay, User, UserRole,
};
use crate::errors::AppResult;

const GUESTS: &[(&str, &str)] = &[
    ("Juan Pérez", "+57 300 123 4567"),
    ("María García", "+57 301 987 6543"),
    ("Carlos Rodríguez", "+57 302 456 7890"),
    ("Ana Martínez", "+57 310 222 3344"),
    ("Luis López", "+57 311 555 6677"),
    ("Carmen Sánchez", "+57 312 888 9900"),
    ("Pedro González", "+57 313 111 2233"),
    ("Rosa Hernández", "+57 314 444 5566"),
];

/// What a seed run created
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub skipped: bool,
    pub users: usize,
    pub hotels: usize,
    pub rooms: usize,
    pub reservations: usize,
    pub payments: usize,
}

struct RoomPlan {
    first: u32,
    count: u32,
    /// `(type, capacity, price)` for a 1-based position in the hotel
    layout: fn(u32) -> (RoomType, u32, f64),
    amenities: &'static [&'static str],
}

fn plaza_layout(i: u32) -> (RoomType, u32, f64) {
    let room_type = match i {
        1..=6 => RoomType::Standard,
        7..=10 => RoomType::Superior,
        _ => RoomType::Suite,
    };
    let capacity = match i {
        1..=8 => 2,
        9..=10 => 3,
        _ => 4,
    };
    let price = match room_type {
        RoomType::Standard => 150_000.0,
        RoomType::Superior => 200_000.0,
        _ => 300_000.0,
    };
    (room_type, capacity, price)
}

fn marina_layout(i: u32) -> (RoomType, u32, f64) {
    let room_type = match i {
        1..=4 => RoomType::Standard,
        5..=6 => RoomType::Superior,
        _ => RoomType::Suite,
    };
    let capacity = if i <= 5 { 2 } else { 3 };
    let price = match room_type {
        RoomType::Standard => 180_000.0,
        RoomType::Superior => 250_000.0,
        _ => 350_000.0,
    };
    (room_type, capacity, price)
}

fn default_hotels() -> Vec<(NewHotel, RoomPlan)> {
    vec![
        (
            NewHotel {
                name: "Hotel Plaza Central".to_string(),
                location: "Centro Histórico".to_string(),
                address: "Calle 10 #15-20, Centro".to_string(),
                phone: "+57 1 234 5678".to_string(),
                email: "info@plazacentral.com".to_string(),
                image: "https://images.pexels.com/photos/258154/pexels-photo-258154.jpeg".to_string(),
            },
            RoomPlan {
                first: 101,
                count: 12,
                layout: plaza_layout,
                amenities: &["WiFi", "TV", "Aire Acondicionado"],
            },
        ),
        (
            NewHotel {
                name: "Hotel Marina Bay".to_string(),
                location: "Zona Rosa".to_string(),
                address: "Carrera 15 #85-40, Zona Rosa".to_string(),
                phone: "+57 1 345 6789".to_string(),
                email: "info@marinabay.com".to_string(),
                image: "https://images.pexels.com/photos/271624/pexels-photo-271624.jpeg".to_string(),
            },
            RoomPlan {
                first: 201,
                count: 8,
                layout: marina_layout,
                amenities: &["WiFi", "TV", "Aire Acondicionado", "Minibar"],
            },
        ),
    ]
}

fn new_rooms(plan: &RoomPlan) -> Vec<NewRoom> {
    (1..=plan.count)
        .map(|i| {
            let (room_type, capacity, nightly_price) = (plan.layout)(i);
            NewRoom {
                number: (plan.first + i - 1).to_string(),
                room_type,
                capacity,
                nightly_price,
                amenities: plan.amenities.iter().map(|a| a.to_string()).collect::<BTreeSet<_>>(),
            }
        })
        .collect()
}

/// Sample bookings for one room, back to back without overlap, spanning a
/// few days either side of `now`. The room status follows the bookings.
fn sample_bookings(
    rng: &mut StdRng,
    room: &mut Room,
    created_by: uuid::Uuid,
    method: &str,
    now: DateTime<Utc>,
) -> AppResult<(Vec<Reservation>, Vec<Payment>)> {
    let check_in_time = NaiveTime::from_hms_opt(CHECK_IN_HOUR, 0, 0).unwrap_or_default();
    let check_out_time = NaiveTime::from_hms_opt(CHECK_OUT_HOUR, 0, 0).unwrap_or_default();

    let mut reservations = Vec::new();
    let mut payments = Vec::new();
    let mut cursor = now.date_naive() - Duration::days(rng.gen_range(3..=6));

    for _ in 0..rng.gen_range(0..=2) {
        let arrival = cursor + Duration::days(rng.gen_range(0..=2));
        let departure = arrival + Duration::days(rng.gen_range(1..=4));
        cursor = departure;

        let stay = Stay::new(
            arrival.and_time(check_in_time).and_utc(),
            departure.and_time(check_out_time).and_utc(),
        )?;
        let &(guest_name, guest_phone) = GUESTS.choose(rng).unwrap_or(&GUESTS[0]);
        let guest_email = format!(
            "{}@example.com",
            guest_name.split_whitespace().next().unwrap_or("guest").to_lowercase()
        );

        let input = NewReservation {
            hotel_id: room.hotel_id,
            room_id: room.id,
            guest_name: guest_name.to_string(),
            guest_email,
            guest_phone: guest_phone.to_string(),
            number_of_guests: rng.gen_range(1..=room.capacity.max(1)),
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            total_override: None,
        };
        let mut reservation = Reservation::new(input, stay, room.nightly_price, created_by);

        if stay.check_out() <= now {
            reservation.reservation_status = ReservationStatus::CheckedOut;
            reservation.payment_status = PaymentStatus::Paid;
            reservation.actual_check_in = Some(stay.check_in());
            reservation.actual_check_out = Some(stay.check_out());
            room.set_status(RoomStatus::Dirty, now);
        } else if stay.covers(now) {
            reservation.reservation_status = ReservationStatus::CheckedIn;
            reservation.actual_check_in = Some(stay.check_in());
            if rng.gen_bool(0.5) {
                reservation.payment_status = PaymentStatus::Paid;
            }
            room.set_status(RoomStatus::Occupied, now);
        }

        if reservation.payment_status == PaymentStatus::Paid {
            let mut payment = Payment::completed(
                reservation.id,
                reservation.total_amount,
                method.to_string(),
                created_by,
            );
            payment.processed_at = stay.check_in();
            payments.push(payment);
        }
        reservations.push(reservation);
    }

    // Rooms whose guests left more than a day ago have been cleaned since
    if room.status == RoomStatus::Dirty
        && reservations
            .iter()
            .all(|r| r.check_out < now - Duration::days(1))
    {
        room.set_status(RoomStatus::Available, now);
    }

    Ok((reservations, payments))
}

/// Seed an empty store. Returns a skipped summary when users already exist.
pub async fn run<U: UnitOfWork>(uow: &U, config: &Config) -> AppResult<SeedSummary> {
    if uow.users().count().await? > 0 {
        tracing::info!("Store already has users, skipping seed");
        return Ok(SeedSummary {
            skipped: true,
            ..SeedSummary::default()
        });
    }

    let mut summary = SeedSummary::default();
    let mut rng = StdRng::from_entropy();
    let now = Utc::now();

    let admin = uow
        .users()
        .create(User::new(
            config.admin_email.clone(),
            Password::new(config.admin_password())?.into_string(),
            DEFAULT_ADMIN_NAME.to_string(),
            UserRole::Admin,
            None,
        )?)
        .await?;
    summary.users += 1;

    let mut staff_hotel = None;
    for (input, plan) in default_hotels() {
        let hotel = Hotel::new(input);
        uow.hotels().save(&hotel).await?;
        summary.hotels += 1;
        staff_hotel.get_or_insert(hotel.id);

        let rooms = uow.rooms().create_many(hotel.id, new_rooms(&plan)).await?;
        summary.rooms += rooms.len();

        let mut changes = Changeset::new();
        let last = rooms.len().saturating_sub(1);
        for (position, mut room) in rooms.into_iter().enumerate() {
            // The last suite of every hotel is out of service
            if position == last {
                room.set_status(RoomStatus::Maintenance, now);
                changes.put(&room)?;
                continue;
            }

            let (reservations, payments) = sample_bookings(
                &mut rng,
                &mut room,
                admin.id,
                &config.default_payment_method,
                now,
            )?;
            for reservation in &reservations {
                changes.put(reservation)?;
            }
            for payment in &payments {
                changes.put(payment)?;
            }
            summary.reservations += reservations.len();
            summary.payments += payments.len();
            changes.put(&room)?;
        }
        uow.commit(changes).await?;
        tracing::info!("Seeded hotel {} ({} rooms)", hotel.name, plan.count);
    }

    uow.users()
        .create(User::new(
            DEFAULT_STAFF_EMAIL.to_string(),
            Password::new(DEFAULT_STAFF_PASSWORD)?.into_string(),
            DEFAULT_STAFF_NAME.to_string(),
            UserRole::Staff,
            staff_hotel,
        )?)
        .await?;
    summary.users += 1;

    tracing::info!(
        "Seed complete: {} hotels, {} rooms, {} reservations",
        summary.hotels,
        summary.rooms,
        summary.reservations
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Persistence;

    #[tokio::test]
    async fn test_seed_is_idempotent_and_never_double_books() {
        let uow = Persistence::in_memory().await.unwrap();
        let config = Config::default();

        let first = run(&uow, &config).await.unwrap();
        assert!(!first.skipped);
        assert_eq!(first.hotels, 2);
        assert_eq!(first.rooms, 20);
        assert_eq!(first.users, 2);

        let second = run(&uow, &config).await.unwrap();
        assert!(second.skipped);
        assert_eq!(uow.hotels().count().await.unwrap(), 2);

        let hotels = uow.hotels().list().await.unwrap();
        assert_eq!(hotels[0].name, "Hotel Marina Bay");
        assert_eq!(hotels[0].total_rooms, 8);
        assert_eq!(hotels[1].total_rooms, 12);

        for room in uow.rooms().find_all().await.unwrap() {
            let booked = uow.reservations().reservations_by_room(room.id).await.unwrap();
            for pair in booked.windows(2) {
                let (a, b) = (pair[0].stay().unwrap(), pair[1].stay().unwrap());
                assert!(!a.overlaps(&b), "room {} double booked", room.number);
            }
        }

        let staff = uow.users().find_by_email("STAFF@hotel.com").await.unwrap().unwrap();
        assert_eq!(staff.hotel_id, Some(hotels[1].id));
    }
}
