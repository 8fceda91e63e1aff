//! Report command - Runs one report for the selected hotel.

use chrono::Utc;
use uuid::Uuid;

use crate::cli::args::{ReportArgs, ReportKind, WindowArgs};
use crate::errors::AppResult;
use crate::reports::ReportWindow;
use crate::services::ServiceContainer;

use super::{emit, Session};

pub async fn execute(session: &Session, args: ReportArgs) -> AppResult<bool> {
    let reports = session.services.reports();
    let user = &session.user;

    match args.kind {
        ReportKind::Occupancy(range) => emit(
            async {
                let (hotel_id, window) = target(session, range).await?;
                reports.occupancy(user, hotel_id, window).await
            }
            .await,
        ),
        ReportKind::Revenue(range) => emit(
            async {
                let (hotel_id, window) = target(session, range).await?;
                reports.revenue(user, hotel_id, window).await
            }
            .await,
        ),
        ReportKind::Rooms(range) => emit(
            async {
                let (hotel_id, window) = target(session, range).await?;
                reports.room_performance(user, hotel_id, window).await
            }
            .await,
        ),
        ReportKind::Payments(range) => emit(
            async {
                let (hotel_id, window) = target(session, range).await?;
                reports.payments(user, hotel_id, window).await
            }
            .await,
        ),
        ReportKind::Stats => emit(
            async {
                let hotel = session.hotel().await?;
                reports.dashboard(user, hotel.id, Utc::now()).await
            }
            .await,
        ),
    }
}

async fn target(session: &Session, range: WindowArgs) -> AppResult<(Uuid, ReportWindow)> {
    let window = ReportWindow::new(range.from, range.to)?;
    let hotel = session.hotel().await?;
    Ok((hotel.id, window))
}
