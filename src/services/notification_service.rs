//! Notification service - Per-user inbox and check-in reminders.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use super::ensure_hotel_access;
use crate::config::TITLE_CHECK_IN_REMINDER;
use crate::domain::{Notification, NotificationKind, ReservationStatus, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{Changeset, ReadRepository, UnitOfWork, WriteRepository};

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// The user's notifications, newest first
    async fn notifications_for(&self, user: &User) -> AppResult<Vec<Notification>>;

    async fn unread_count(&self, user: &User) -> AppResult<usize>;

    async fn mark_read(&self, user: &User, notification_id: Uuid) -> AppResult<Notification>;

    /// Returns how many notifications changed
    async fn mark_all_read(&self, user: &User) -> AppResult<usize>;

    /// Remind `user` of confirmed reservations arriving the day after `today`.
    /// Reservations already reminded about are skipped.
    async fn schedule_check_in_reminders(
        &self,
        user: &User,
        hotel_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Vec<Notification>>;
}

pub struct NotificationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NotificationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NotificationService for NotificationManager<U> {
    async fn notifications_for(&self, user: &User) -> AppResult<Vec<Notification>> {
        self.uow.notifications().notifications_by_user(user.id).await
    }

    async fn unread_count(&self, user: &User) -> AppResult<usize> {
        Ok(self
            .notifications_for(user)
            .await?
            .iter()
            .filter(|notification| !notification.read)
            .count())
    }

    async fn mark_read(&self, user: &User, notification_id: Uuid) -> AppResult<Notification> {
        let mut notification = self.uow.notifications().get(notification_id).await?;
        if notification.user_id != user.id {
            return Err(AppError::Forbidden);
        }

        if notification.mark_read() {
            self.uow.notifications().save(&notification).await?;
        }
        Ok(notification)
    }

    async fn mark_all_read(&self, user: &User) -> AppResult<usize> {
        let mut changes = Changeset::new();
        for mut notification in self.notifications_for(user).await? {
            if notification.mark_read() {
                changes.put(&notification)?;
            }
        }

        let changed = changes.len();
        self.uow.commit(changes).await?;
        tracing::debug!("Marked {} notifications read for {}", changed, user.email);
        Ok(changed)
    }

    async fn schedule_check_in_reminders(
        &self,
        user: &User,
        hotel_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Vec<Notification>> {
        ensure_hotel_access(user, hotel_id)?;
        let tomorrow = today + Duration::days(1);

        let reminded: HashSet<Uuid> = self
            .notifications_for(user)
            .await?
            .into_iter()
            .filter(|notification| notification.kind == NotificationKind::CheckInReminder)
            .filter_map(|notification| notification.reservation_id)
            .collect();

        let reminders: Vec<Notification> = self
            .uow
            .reservations()
            .reservations_by_hotel(hotel_id)
            .await?
            .into_iter()
            .filter(|reservation| {
                reservation.reservation_status == ReservationStatus::Confirmed
                    && reservation.check_in.date_naive() == tomorrow
                    && !reminded.contains(&reservation.id)
            })
            .map(|reservation| {
                Notification::new(
                    user.id,
                    NotificationKind::CheckInReminder,
                    TITLE_CHECK_IN_REMINDER,
                    format!("Check-in tomorrow: {}", reservation.guest_name),
                )
                .for_reservation(reservation.id)
                .for_room(reservation.room_id)
            })
            .collect();

        let mut changes = Changeset::new();
        for reminder in &reminders {
            changes.put(reminder)?;
        }
        self.uow.commit(changes).await?;

        tracing::info!("Scheduled {} check-in reminders for {}", reminders.len(), tomorrow);
        Ok(reminders)
    }
}
