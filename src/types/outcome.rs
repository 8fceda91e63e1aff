use serde::Serialize;

use crate::errors::{AppError, AppResult};

/// Structured result handed to callers of the console.
///
/// Declared failures and storage failures share this shape, so callers only
/// ever inspect `success`.
#[derive(Debug, Serialize)]
pub struct Outcome<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Outcome<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            code: None,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            code: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            code: Some(error.code()),
            message: Some(error.user_message()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl Outcome<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            code: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> From<AppResult<T>> for Outcome<T> {
    fn from(result: AppResult<T>) -> Self {
        match result {
            Ok(data) => Outcome::success(data),
            Err(error) => {
                if error.is_store_failure() {
                    tracing::error!("Operation failed in the store: {}", error);
                } else {
                    tracing::warn!("Operation rejected: {}", error);
                }
                Outcome::failure(&error)
            }
        }
    }
}
