//! Report service tests over a small booked hotel.

mod common;

use chrono::{NaiveDate, Utc};

use hotel_ops::domain::{NewPayment, UserRole};
use hotel_ops::errors::AppError;
use hotel_ops::reports::ReportWindow;
use hotel_ops::services::ServiceContainer;

use common::{booking, day, desk, hotel_with_rooms, new_user, PASSWORD};

fn march(from: u32, to: u32) -> ReportWindow {
    ReportWindow::new(
        NaiveDate::from_ymd_opt(2024, 3, from).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, to).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_revenue_and_room_performance() {
    let desk = desk().await;
    let (hotel, rooms) = hotel_with_rooms(&desk, "Plaza", 100.0).await;
    let reservations = desk.services.reservations();

    let paid = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(2, 15), day(5, 11)))
        .await
        .unwrap();
    reservations
        .record_payment(
            &desk.admin,
            paid.id,
            NewPayment {
                amount: 300.0,
                method: None,
            },
        )
        .await
        .unwrap();
    reservations
        .create_reservation(&desk.admin, booking(&rooms[1], day(3, 15), day(4, 11)))
        .await
        .unwrap();

    let reports = desk.services.reports();

    let revenue = reports.revenue(&desk.admin, hotel.id, march(1, 7)).await.unwrap();
    assert_eq!(revenue.total_revenue, 300.0);
    assert_eq!(revenue.pending_revenue, 100.0);
    assert_eq!(revenue.potential_revenue, 0.0);
    assert_eq!(revenue.paid_reservations, 1);
    assert_eq!(revenue.average_reservation_value, 300.0);

    let performance = reports
        .room_performance(&desk.admin, hotel.id, march(1, 7))
        .await
        .unwrap();
    assert_eq!(performance.room_performance[0].room.id, rooms[0].id);
    assert_eq!(performance.room_performance[0].total_revenue, 300.0);
    assert_eq!(performance.room_performance[1].total_revenue, 0.0);
    assert_eq!(performance.total_revenue, 300.0);
}

#[tokio::test]
async fn test_payment_report_uses_configured_default_method() {
    let desk = desk().await;
    let (hotel, rooms) = hotel_with_rooms(&desk, "Plaza", 100.0).await;
    let reservations = desk.services.reservations();

    let reservation = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(2, 15), day(3, 11)))
        .await
        .unwrap();
    reservations
        .record_payment(
            &desk.admin,
            reservation.id,
            NewPayment {
                amount: 100.0,
                method: None,
            },
        )
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let window = ReportWindow::new(today, today).unwrap();
    let report = desk
        .services
        .reports()
        .payments(&desk.admin, hotel.id, window)
        .await
        .unwrap();

    assert_eq!(report.total_payments, 100.0);
    assert_eq!(report.total_transactions, 1);
    assert_eq!(report.payments_by_method["cash"].count, 1);
}

#[tokio::test]
async fn test_dashboard_reflects_room_board() {
    let desk = desk().await;
    let (hotel, rooms) = hotel_with_rooms(&desk, "Plaza", 100.0).await;
    let now = Utc::now();

    let reservation = desk
        .services
        .reservations()
        .create_reservation(
            &desk.admin,
            booking(&rooms[0], now - chrono::Duration::hours(1), now + chrono::Duration::days(1)),
        )
        .await
        .unwrap();
    desk.services
        .reservations()
        .check_in(&desk.admin, reservation.id)
        .await
        .unwrap();

    let stats = desk
        .services
        .reports()
        .dashboard(&desk.admin, hotel.id, now)
        .await
        .unwrap();

    assert_eq!(stats.total_rooms, 2);
    assert_eq!(stats.room_status.occupied, 1);
    assert_eq!(stats.room_status.available, 1);
    assert_eq!(stats.occupancy_rate, 50.0);
}

#[tokio::test]
async fn test_reports_respect_hotel_access() {
    let desk = desk().await;
    let (plaza, _) = hotel_with_rooms(&desk, "Plaza", 100.0).await;
    let (marina, _) = hotel_with_rooms(&desk, "Marina", 100.0).await;

    desk.services
        .auth()
        .register(new_user("staff@plaza.com", UserRole::Staff, Some(plaza.id)))
        .await
        .unwrap();
    let staff = desk.services.auth().login("staff@plaza.com", PASSWORD).await.unwrap();

    let own = desk.services.reports().occupancy(&staff, plaza.id, march(1, 3)).await;
    assert!(own.is_ok());

    let other = desk.services.reports().occupancy(&staff, marina.id, march(1, 3)).await;
    assert!(matches!(other, Err(AppError::Forbidden)));
}
