//! Notification records.

use uuid::Uuid;

use super::{ReadRepository, Record, Repository};
use crate::config::COLLECTION_NOTIFICATIONS;
use crate::domain::Notification;
use crate::errors::AppResult;
use crate::infra::store::IndexSpec;

impl Record for Notification {
    const COLLECTION: &'static str = COLLECTION_NOTIFICATIONS;
    const ENTITY: &'static str = "Notification";

    fn id(&self) -> Uuid {
        self.id
    }

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::new("userId", "userId")]
    }
}

impl Repository<Notification> {
    /// A user's notifications, newest first
    pub async fn notifications_by_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let mut notifications = self.find_by_index("userId", &user_id.to_string()).await?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }
}
