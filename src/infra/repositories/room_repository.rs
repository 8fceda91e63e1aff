//! Room records and the bulk insert that keeps `Hotel.totalRooms` in step.

use std::collections::HashSet;

use uuid::Uuid;

use super::{ReadRepository, Record, Repository};
use crate::config::COLLECTION_ROOMS;
use crate::domain::{Hotel, NewRoom, Room};
use crate::errors::{AppError, AppResult};
use crate::infra::store::{IndexSpec, WriteBatch};

impl Record for Room {
    const COLLECTION: &'static str = COLLECTION_ROOMS;
    const ENTITY: &'static str = "Room";

    fn id(&self) -> Uuid {
        self.id
    }

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::new("hotelId", "hotelId"),
            IndexSpec::new("number", "number"),
        ]
    }
}

impl Repository<Room> {
    /// Rooms of a hotel ordered by room number
    pub async fn rooms_by_hotel(&self, hotel_id: Uuid) -> AppResult<Vec<Room>> {
        let mut rooms = self.find_by_index("hotelId", &hotel_id.to_string()).await?;
        rooms.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(rooms)
    }

    pub async fn find_by_number(&self, hotel_id: Uuid, number: &str) -> AppResult<Option<Room>> {
        Ok(self
            .find_by_index("number", number)
            .await?
            .into_iter()
            .find(|room| room.hotel_id == hotel_id))
    }

    /// Insert rooms for a hotel and raise its room count in the same batch.
    ///
    /// Room numbers must be unique within the hotel, both against existing
    /// rooms and within `rooms` itself.
    pub async fn create_many(&self, hotel_id: Uuid, rooms: Vec<NewRoom>) -> AppResult<Vec<Room>> {
        let document = self
            .store
            .get(Hotel::COLLECTION, &hotel_id.to_string())
            .await?
            .ok_or_else(|| AppError::not_found(Hotel::ENTITY))?;
        let mut hotel = Hotel::from_document(document)?;

        let mut taken: HashSet<String> = self
            .rooms_by_hotel(hotel_id)
            .await?
            .into_iter()
            .map(|room| room.number)
            .collect();

        let mut created = Vec::with_capacity(rooms.len());
        for input in rooms {
            let room = Room::new(hotel_id, input);
            if !taken.insert(room.number.clone()) {
                return Err(AppError::conflict(format!(
                    "Room {} already exists in {}",
                    room.number, hotel.name
                )));
            }
            created.push(room);
        }

        if created.is_empty() {
            return Ok(created);
        }

        hotel.total_rooms += created.len() as u32;

        let mut batch = WriteBatch::new();
        for room in &created {
            batch.put(Room::COLLECTION, room.to_document()?);
        }
        batch.put(Hotel::COLLECTION, hotel.to_document()?);
        self.store.apply(batch).await?;

        tracing::debug!("Created {} rooms in hotel {}", created.len(), hotel_id);
        Ok(created)
    }
}
