//! Report service - Loads a hotel snapshot and runs the report functions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use super::ensure_hotel_access;
use crate::domain::{Reservation, Room, User};
use crate::errors::AppResult;
use crate::infra::{ReadRepository, UnitOfWork};
use crate::reports::{
    dashboard_stats, occupancy_report, payment_report, revenue_report, room_performance_report,
    DashboardStats, OccupancyReport, PaymentReport, ReportWindow, RevenueReport,
    RoomPerformanceReport,
};

#[async_trait]
pub trait ReportService: Send + Sync {
    async fn occupancy(
        &self,
        actor: &User,
        hotel_id: Uuid,
        window: ReportWindow,
    ) -> AppResult<OccupancyReport>;

    async fn revenue(
        &self,
        actor: &User,
        hotel_id: Uuid,
        window: ReportWindow,
    ) -> AppResult<RevenueReport>;

    async fn room_performance(
        &self,
        actor: &User,
        hotel_id: Uuid,
        window: ReportWindow,
    ) -> AppResult<RoomPerformanceReport>;

    async fn payments(
        &self,
        actor: &User,
        hotel_id: Uuid,
        window: ReportWindow,
    ) -> AppResult<PaymentReport>;

    /// Dashboard figures as of `now`
    async fn dashboard(
        &self,
        actor: &User,
        hotel_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<DashboardStats>;
}

pub struct ReportManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReportManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn snapshot(&self, actor: &User, hotel_id: Uuid) -> AppResult<(Vec<Room>, Vec<Reservation>)> {
        ensure_hotel_access(actor, hotel_id)?;
        self.uow.hotels().get(hotel_id).await?;

        parallel::join2(
            self.uow.rooms().rooms_by_hotel(hotel_id),
            self.uow.reservations().reservations_by_hotel(hotel_id),
        )
        .await
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportManager<U> {
    async fn occupancy(
        &self,
        actor: &User,
        hotel_id: Uuid,
        window: ReportWindow,
    ) -> AppResult<OccupancyReport> {
        let (rooms, reservations) = self.snapshot(actor, hotel_id).await?;
        let report = occupancy_report(&rooms, &reservations, &window);
        tracing::debug!("Occupancy for hotel {}: {}%", hotel_id, report.occupancy_rate);
        Ok(report)
    }

    async fn revenue(
        &self,
        actor: &User,
        hotel_id: Uuid,
        window: ReportWindow,
    ) -> AppResult<RevenueReport> {
        let (rooms, reservations) = self.snapshot(actor, hotel_id).await?;
        Ok(revenue_report(&rooms, &reservations, &window))
    }

    async fn room_performance(
        &self,
        actor: &User,
        hotel_id: Uuid,
        window: ReportWindow,
    ) -> AppResult<RoomPerformanceReport> {
        let (rooms, reservations) = self.snapshot(actor, hotel_id).await?;
        Ok(room_performance_report(&rooms, &reservations, &window))
    }

    async fn payments(
        &self,
        actor: &User,
        hotel_id: Uuid,
        window: ReportWindow,
    ) -> AppResult<PaymentReport> {
        let (_, reservations) = self.snapshot(actor, hotel_id).await?;
        let payments = self.uow.payments().find_all().await?;
        Ok(payment_report(&reservations, &payments, &window))
    }

    async fn dashboard(
        &self,
        actor: &User,
        hotel_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<DashboardStats> {
        let (rooms, reservations) = self.snapshot(actor, hotel_id).await?;
        Ok(dashboard_stats(&rooms, &reservations, now))
    }
}
