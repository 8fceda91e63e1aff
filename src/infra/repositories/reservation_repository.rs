//! Reservation records.

use uuid::Uuid;

use super::{ReadRepository, Record, Repository};
use crate::config::COLLECTION_RESERVATIONS;
use crate::domain::{normalize_email, Reservation, Stay};
use crate::errors::AppResult;
use crate::infra::store::IndexSpec;

impl Record for Reservation {
    const COLLECTION: &'static str = COLLECTION_RESERVATIONS;
    const ENTITY: &'static str = "Reservation";

    fn id(&self) -> Uuid {
        self.id
    }

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::new("hotelId", "hotelId"),
            IndexSpec::new("roomId", "roomId"),
            IndexSpec::new("guestEmail", "guestEmail"),
            IndexSpec::new("checkIn", "checkIn"),
            IndexSpec::new("status", "reservationStatus"),
        ]
    }
}

fn by_check_in(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
    reservations.sort_by_key(|reservation| reservation.check_in);
    reservations
}

impl Repository<Reservation> {
    pub async fn reservations_by_hotel(&self, hotel_id: Uuid) -> AppResult<Vec<Reservation>> {
        let found = self.find_by_index("hotelId", &hotel_id.to_string()).await?;
        Ok(by_check_in(found))
    }

    pub async fn reservations_by_room(&self, room_id: Uuid) -> AppResult<Vec<Reservation>> {
        let found = self.find_by_index("roomId", &room_id.to_string()).await?;
        Ok(by_check_in(found))
    }

    pub async fn reservations_by_guest(&self, email: &str) -> AppResult<Vec<Reservation>> {
        let found = self
            .find_by_index("guestEmail", &normalize_email(email))
            .await?;
        Ok(by_check_in(found))
    }

    /// Confirmed or checked-in reservations holding the room
    pub async fn active_for_room(&self, room_id: Uuid) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations_by_room(room_id)
            .await?
            .into_iter()
            .filter(Reservation::is_active)
            .collect())
    }

    /// Active reservations of the room overlapping `stay`, ignoring `exclude`.
    pub async fn conflicting(
        &self,
        room_id: Uuid,
        stay: &Stay,
        exclude: Option<Uuid>,
    ) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations_by_room(room_id)
            .await?
            .into_iter()
            .filter(|reservation| Some(reservation.id) != exclude && reservation.blocks(stay))
            .collect())
    }
}
