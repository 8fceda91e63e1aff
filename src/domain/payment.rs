//! Payment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Only completed payments are recorded; there is no partial or failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentRecordStatus {
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub amount: f64,
    /// Free-form tag such as `cash` or `card`
    pub method: String,
    pub processed_by: Uuid,
    #[serde(alias = "date")]
    pub processed_at: DateTime<Utc>,
    pub status: PaymentRecordStatus,
}

impl Payment {
    pub fn completed(reservation_id: Uuid, amount: f64, method: String, processed_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            reservation_id,
            amount,
            method,
            processed_by,
            processed_at: Utc::now(),
            status: PaymentRecordStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPayment {
    #[validate(
        range(exclusive_min = 0.0, message = "Payment amount must be positive"),
        custom(function = "super::finite", message = "Payment amount must be a finite amount")
    )]
    pub amount: f64,
    /// Falls back to the configured default method
    pub method: Option<String>,
}
