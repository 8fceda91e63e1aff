//! Payment records.

use uuid::Uuid;

use super::{ReadRepository, Record, Repository};
use crate::config::COLLECTION_PAYMENTS;
use crate::domain::Payment;
use crate::errors::AppResult;
use crate::infra::store::IndexSpec;

impl Record for Payment {
    const COLLECTION: &'static str = COLLECTION_PAYMENTS;
    const ENTITY: &'static str = "Payment";

    fn id(&self) -> Uuid {
        self.id
    }

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::new("reservationId", "reservationId")]
    }
}

impl Repository<Payment> {
    /// Payments of a reservation, oldest first
    pub async fn payments_by_reservation(&self, reservation_id: Uuid) -> AppResult<Vec<Payment>> {
        let mut payments = self
            .find_by_index("reservationId", &reservation_id.to_string())
            .await?;
        payments.sort_by_key(|payment| payment.processed_at);
        Ok(payments)
    }
}
