//! Hotel entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: String,
    /// Denormalized count of rooms, maintained by the room repository
    #[serde(default)]
    pub total_rooms: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Hotel {
    pub fn new(input: NewHotel) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            location: input.location,
            address: input.address,
            phone: input.phone,
            email: input.email,
            image: input.image,
            total_rooms: 0,
            active: true,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, update: HotelUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewHotel {
    #[validate(length(min = 1, message = "Hotel name is required"))]
    pub name: String,
    pub location: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub image: String,
}

/// Partial hotel edit; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct HotelUpdate {
    #[validate(length(min = 1, message = "Hotel name is required"))]
    pub name: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub active: Option<bool>,
}
