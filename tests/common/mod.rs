//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use hotel_ops::config::Config;
use hotel_ops::domain::{Hotel, NewHotel, NewReservation, NewRoom, NewUser, Room, RoomType, User, UserRole};
use hotel_ops::infra::Persistence;
use hotel_ops::services::{ServiceContainer, Services};

pub const ADMIN_EMAIL: &str = "manager@hotel.com";
pub const PASSWORD: &str = "password123";

pub struct Desk {
    pub services: Services,
    pub admin: User,
}

/// Services over a fresh in-memory store with one signed-in admin.
pub async fn desk() -> Desk {
    let uow = Arc::new(Persistence::in_memory().await.unwrap());
    let services = Services::from_persistence(uow, &Config::default());

    services
        .auth()
        .register(new_user(ADMIN_EMAIL, UserRole::Admin, None))
        .await
        .unwrap();
    let admin = services.auth().login(ADMIN_EMAIL, PASSWORD).await.unwrap();

    Desk { services, admin }
}

pub fn new_user(email: &str, role: UserRole, hotel_id: Option<Uuid>) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        name: "Front Desk".to_string(),
        role,
        hotel_id,
    }
}

pub fn new_hotel(name: &str) -> NewHotel {
    NewHotel {
        name: name.to_string(),
        location: "Bogotá".to_string(),
        address: "Calle 10 #15-20".to_string(),
        phone: "+57 1 234 5678".to_string(),
        email: "info@hotel.com".to_string(),
        image: String::new(),
    }
}

pub fn new_room(number: &str, price: f64) -> NewRoom {
    NewRoom {
        number: number.to_string(),
        room_type: RoomType::Standard,
        capacity: 2,
        nightly_price: price,
        amenities: Default::default(),
    }
}

/// A hotel with rooms `101` and `102`, both at `price` per night.
pub async fn hotel_with_rooms(desk: &Desk, name: &str, price: f64) -> (Hotel, Vec<Room>) {
    let hotel = desk
        .services
        .hotels()
        .create_hotel(&desk.admin, new_hotel(name))
        .await
        .unwrap();
    let rooms = desk
        .services
        .rooms()
        .create_rooms(
            &desk.admin,
            hotel.id,
            vec![new_room("101", price), new_room("102", price)],
        )
        .await
        .unwrap();
    (hotel, rooms)
}

/// March 2024 at the given day and hour (UTC).
pub fn day(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, hour, 0, 0).unwrap()
}

pub fn booking(room: &Room, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> NewReservation {
    NewReservation {
        hotel_id: room.hotel_id,
        room_id: room.id,
        guest_name: "Ana Torres".to_string(),
        guest_email: "Ana@Example.com".to_string(),
        guest_phone: "+57 300 123 4567".to_string(),
        number_of_guests: 2,
        check_in,
        check_out,
        total_override: None,
    }
}
