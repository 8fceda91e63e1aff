//! Room entity and its housekeeping status.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Standard,
    Superior,
    Deluxe,
    Suite,
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RoomType::Standard => "Standard",
            RoomType::Superior => "Superior",
            RoomType::Deluxe => "Deluxe",
            RoomType::Suite => "Suite",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(RoomType::Standard),
            "superior" => Ok(RoomType::Superior),
            "deluxe" => Ok(RoomType::Deluxe),
            "suite" => Ok(RoomType::Suite),
            other => Err(format!("unknown room type '{}'", other)),
        }
    }
}

/// Room status as shown on the room board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Occupied,
    Dirty,
    Maintenance,
}

impl RoomStatus {
    pub const ALL: [RoomStatus; 4] = [
        RoomStatus::Available,
        RoomStatus::Occupied,
        RoomStatus::Dirty,
        RoomStatus::Maintenance,
    ];
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Dirty => "dirty",
            RoomStatus::Maintenance => "maintenance",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomStatus::ALL
            .into_iter()
            .find(|status| status.to_string() == s.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown room status '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    /// Unique within the hotel only
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
    #[serde(alias = "price")]
    pub nightly_price: f64,
    pub status: RoomStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cleaned: Option<DateTime<Utc>>,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// New rooms start clean and available.
    pub fn new(hotel_id: Uuid, input: NewRoom) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            hotel_id,
            number: input.number.trim().to_string(),
            room_type: input.room_type,
            capacity: input.capacity,
            nightly_price: input.nightly_price,
            status: RoomStatus::Available,
            last_cleaned: Some(now),
            amenities: input.amenities,
            created_at: now,
        }
    }

    /// Change housekeeping status. Marking a room available always stamps
    /// `last_cleaned`, even when it already was available.
    pub fn set_status(&mut self, status: RoomStatus, at: DateTime<Utc>) {
        self.status = status;
        if status == RoomStatus::Available {
            self.last_cleaned = Some(at);
        }
    }

    pub fn is_bookable(&self) -> bool {
        self.status != RoomStatus::Maintenance
    }

    pub fn apply(&mut self, update: RoomUpdate) {
        if let Some(number) = update.number {
            self.number = number.trim().to_string();
        }
        if let Some(room_type) = update.room_type {
            self.room_type = room_type;
        }
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
        if let Some(price) = update.nightly_price {
            self.nightly_price = price;
        }
        if let Some(amenities) = update.amenities {
            self.amenities = amenities;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewRoom {
    #[validate(length(min = 1, message = "Room number is required"))]
    pub number: String,
    pub room_type: RoomType,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: u32,
    #[validate(
        range(min = 0.0, message = "Price cannot be negative"),
        custom(function = "super::finite", message = "Price must be a finite amount")
    )]
    pub nightly_price: f64,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
}

/// Editable room attributes. Status only moves through the room status
/// operation and reservation transitions.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RoomUpdate {
    #[validate(length(min = 1, message = "Room number is required"))]
    pub number: Option<String>,
    pub room_type: Option<RoomType>,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<u32>,
    #[validate(
        range(min = 0.0, message = "Price cannot be negative"),
        custom(function = "super::finite", message = "Price must be a finite amount")
    )]
    pub nightly_price: Option<f64>,
    pub amenities: Option<BTreeSet<String>>,
}
