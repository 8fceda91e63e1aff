//! Notifications command - Inbox, read marks and arrival reminders.

use chrono::Utc;

use crate::cli::args::NotificationArgs;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

use super::{emit, Session};

pub async fn execute(session: &Session, args: NotificationArgs) -> AppResult<bool> {
    let notifications = session.services.notifications();
    let user = &session.user;

    if args.mark_read {
        return emit(notifications.mark_all_read(user).await);
    }

    if args.reminders {
        let result = match session.hotel().await {
            Ok(hotel) => {
                notifications
                    .schedule_check_in_reminders(user, hotel.id, Utc::now().date_naive())
                    .await
            }
            Err(error) => Err(error),
        };
        return emit(result);
    }

    emit(notifications.notifications_for(user).await)
}
