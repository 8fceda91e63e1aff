//! Service Container - Centralized service access.
//!
//! Commands receive a `ServiceContainer` and never see the storage
//! backend; `Services` wires every manager onto one shared `Persistence`.

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, HotelManager, HotelService, NotificationManager,
    NotificationService, ReportManager, ReportService, ReservationManager, ReservationService,
    RoomManager, RoomService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn hotels(&self) -> Arc<dyn HotelService>;

    fn rooms(&self) -> Arc<dyn RoomService>;

    fn reservations(&self) -> Arc<dyn ReservationService>;

    fn notifications(&self) -> Arc<dyn NotificationService>;

    fn reports(&self) -> Arc<dyn ReportService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    hotel_service: Arc<dyn HotelService>,
    room_service: Arc<dyn RoomService>,
    reservation_service: Arc<dyn ReservationService>,
    notification_service: Arc<dyn NotificationService>,
    report_service: Arc<dyn ReportService>,
}

impl Services {
    /// Build every service over one persistence handle
    pub fn from_persistence(uow: Arc<Persistence>, config: &Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone())),
            hotel_service: Arc::new(HotelManager::new(uow.clone())),
            room_service: Arc::new(RoomManager::new(uow.clone())),
            reservation_service: Arc::new(ReservationManager::new(uow.clone(), config)),
            notification_service: Arc::new(NotificationManager::new(uow.clone())),
            report_service: Arc::new(ReportManager::new(uow)),
        }
    }

    /// Connect the configured store and build the services over it
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let uow = Arc::new(Persistence::connect(config).await?);
        Ok(Self::from_persistence(uow, config))
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn hotels(&self) -> Arc<dyn HotelService> {
        self.hotel_service.clone()
    }

    fn rooms(&self) -> Arc<dyn RoomService> {
        self.room_service.clone()
    }

    fn reservations(&self) -> Arc<dyn ReservationService> {
        self.reservation_service.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }
}

/// Running independent store reads concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// If either operation fails, the error is returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
