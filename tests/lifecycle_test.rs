//! Reservation lifecycle tests over the in-memory store.

mod common;

use chrono::NaiveDate;

use hotel_ops::domain::{
    GuestDetails, NewPayment, NotificationKind, PaymentStatus, ReservationStatus, RoomStatus,
    RoomUpdate,
};
use hotel_ops::errors::AppError;
use hotel_ops::reports::ReportWindow;
use hotel_ops::services::ServiceContainer;

use common::{booking, day, desk, hotel_with_rooms, new_room};

fn payment(amount: f64) -> NewPayment {
    NewPayment {
        amount,
        method: Some("card".to_string()),
    }
}

#[tokio::test]
async fn test_full_stay_from_booking_to_occupancy_report() {
    let desk = desk().await;
    let (hotel, rooms) = hotel_with_rooms(&desk, "Hotel H", 100.0).await;
    let reservations = desk.services.reservations();
    let admin = &desk.admin;

    let reservation = reservations
        .create_reservation(admin, booking(&rooms[0], day(1, 0), day(3, 0)))
        .await
        .unwrap();
    assert_eq!(reservation.total_amount, 200.0);
    assert_eq!(reservation.payment_status, PaymentStatus::Pending);
    assert_eq!(reservation.reservation_status, ReservationStatus::Confirmed);

    let early = reservations.check_out(admin, reservation.id).await;
    assert!(matches!(early, Err(AppError::PreconditionFailed(_))));

    reservations
        .record_payment(admin, reservation.id, payment(200.0))
        .await
        .unwrap();
    let paid = reservations.get_reservation(admin, reservation.id).await.unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    let checked_in = reservations.check_in(admin, reservation.id).await.unwrap();
    assert_eq!(checked_in.reservation_status, ReservationStatus::CheckedIn);
    let room = desk.services.rooms().get_room(admin, rooms[0].id).await.unwrap();
    assert_eq!(room.status, RoomStatus::Occupied);

    let checked_out = reservations.check_out(admin, reservation.id).await.unwrap();
    assert_eq!(checked_out.reservation_status, ReservationStatus::CheckedOut);
    assert!(checked_out.actual_check_out.is_some());
    let room = desk.services.rooms().get_room(admin, rooms[0].id).await.unwrap();
    assert_eq!(room.status, RoomStatus::Dirty);

    let window = ReportWindow::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
    )
    .unwrap();
    let report = desk
        .services
        .reports()
        .occupancy(admin, hotel.id, window)
        .await
        .unwrap();
    assert_eq!(report.occupied_room_nights, 2);
    assert_eq!(report.occupancy_rate, 50.0);
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected() {
    let desk = desk().await;
    let (_, rooms) = hotel_with_rooms(&desk, "Hotel H", 100.0).await;
    let reservations = desk.services.reservations();

    reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(1, 15), day(4, 11)))
        .await
        .unwrap();

    let clash = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(3, 15), day(5, 11)))
        .await;
    assert!(matches!(clash, Err(AppError::Conflict(_))));

    // Back-to-back stays share no instant
    reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(4, 11), day(5, 11)))
        .await
        .unwrap();

    // The other room is free
    reservations
        .create_reservation(&desk.admin, booking(&rooms[1], day(3, 15), day(5, 11)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_room() {
    let desk = desk().await;
    let (hotel, rooms) = hotel_with_rooms(&desk, "Hotel H", 100.0).await;
    let reservations = desk.services.reservations();

    let first = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(1, 15), day(4, 11)))
        .await
        .unwrap();
    let cancelled = reservations
        .cancel_reservation(&desk.admin, first.id)
        .await
        .unwrap();
    assert_eq!(cancelled.reservation_status, ReservationStatus::Cancelled);

    let available = desk
        .services
        .rooms()
        .available_rooms(&desk.admin, hotel.id, day(2, 15), day(3, 11))
        .await
        .unwrap();
    assert_eq!(available.len(), 2);

    reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(2, 15), day(3, 11)))
        .await
        .unwrap();

    let again = reservations.cancel_reservation(&desk.admin, first.id).await;
    assert!(matches!(again, Err(AppError::PreconditionFailed(_))));
}

#[tokio::test]
async fn test_maintenance_room_cannot_be_booked() {
    let desk = desk().await;
    let (hotel, rooms) = hotel_with_rooms(&desk, "Hotel H", 100.0).await;

    desk.services
        .rooms()
        .set_room_status(&desk.admin, rooms[1].id, RoomStatus::Maintenance)
        .await
        .unwrap();

    let result = desk
        .services
        .reservations()
        .create_reservation(&desk.admin, booking(&rooms[1], day(1, 15), day(2, 11)))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let available = desk
        .services
        .rooms()
        .available_rooms(&desk.admin, hotel.id, day(1, 15), day(2, 11))
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, rooms[0].id);
}

#[tokio::test]
async fn test_check_in_requires_confirmed_reservation() {
    let desk = desk().await;
    let (_, rooms) = hotel_with_rooms(&desk, "Hotel H", 100.0).await;
    let reservations = desk.services.reservations();

    let reservation = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(1, 15), day(2, 11)))
        .await
        .unwrap();
    reservations.check_in(&desk.admin, reservation.id).await.unwrap();

    let twice = reservations.check_in(&desk.admin, reservation.id).await;
    assert!(matches!(twice, Err(AppError::PreconditionFailed(_))));
}

#[tokio::test]
async fn test_extend_stay_recomputes_total() {
    let desk = desk().await;
    let (_, rooms) = hotel_with_rooms(&desk, "Hotel H", 120.0).await;
    let reservations = desk.services.reservations();

    let reservation = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(1, 15), day(3, 11)))
        .await
        .unwrap();
    assert_eq!(reservation.total_amount, 240.0);

    let extended = reservations
        .extend_stay(&desk.admin, reservation.id, day(5, 11))
        .await
        .unwrap();
    assert_eq!(extended.check_out, day(5, 11));
    assert_eq!(extended.total_amount, 480.0);

    let blocker = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(6, 15), day(8, 11)))
        .await
        .unwrap();
    let into_blocker = reservations
        .extend_stay(&desk.admin, reservation.id, day(7, 11))
        .await;
    assert!(matches!(into_blocker, Err(AppError::Conflict(_))));

    let rescheduled = reservations
        .reschedule(&desk.admin, blocker.id, day(9, 15), day(10, 11))
        .await
        .unwrap();
    assert_eq!(rescheduled.total_amount, 120.0);
}

#[tokio::test]
async fn test_moving_a_checked_in_guest_swaps_room_status() {
    let desk = desk().await;
    let (_, rooms) = hotel_with_rooms(&desk, "Hotel H", 100.0).await;
    let reservations = desk.services.reservations();

    let reservation = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(1, 15), day(3, 11)))
        .await
        .unwrap();
    reservations.check_in(&desk.admin, reservation.id).await.unwrap();

    let moved = reservations
        .move_reservation(&desk.admin, reservation.id, rooms[1].id)
        .await
        .unwrap();
    assert_eq!(moved.room_id, rooms[1].id);
    assert_eq!(moved.total_amount, reservation.total_amount);

    let old_room = desk.services.rooms().get_room(&desk.admin, rooms[0].id).await.unwrap();
    let new_room = desk.services.rooms().get_room(&desk.admin, rooms[1].id).await.unwrap();
    assert_eq!(old_room.status, RoomStatus::Dirty);
    assert_eq!(new_room.status, RoomStatus::Occupied);
}

#[tokio::test]
async fn test_update_guest_checks_capacity() {
    let desk = desk().await;
    let (_, rooms) = hotel_with_rooms(&desk, "Hotel H", 100.0).await;
    let reservations = desk.services.reservations();

    let reservation = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(1, 15), day(3, 11)))
        .await
        .unwrap();

    let crowded = reservations
        .update_guest(
            &desk.admin,
            reservation.id,
            GuestDetails {
                number_of_guests: Some(5),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(crowded, Err(AppError::Validation(_))));

    let renamed = reservations
        .update_guest(
            &desk.admin,
            reservation.id,
            GuestDetails {
                guest_name: Some("Ana María Torres".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.guest_name, "Ana María Torres");

    let by_guest = reservations
        .reservations_for_guest(&desk.admin, "ANA@example.com")
        .await
        .unwrap();
    assert_eq!(by_guest.len(), 1);
}

#[tokio::test]
async fn test_transitions_leave_notifications() {
    let desk = desk().await;
    let (_, rooms) = hotel_with_rooms(&desk, "Hotel H", 100.0).await;
    let reservations = desk.services.reservations();

    let reservation = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(1, 15), day(2, 11)))
        .await
        .unwrap();
    reservations
        .record_payment(&desk.admin, reservation.id, payment(100.0))
        .await
        .unwrap();
    reservations.check_in(&desk.admin, reservation.id).await.unwrap();
    reservations.check_out(&desk.admin, reservation.id).await.unwrap();

    let inbox = desk
        .services
        .notifications()
        .notifications_for(&desk.admin)
        .await
        .unwrap();
    let kinds: Vec<NotificationKind> = inbox.iter().map(|n| n.kind).collect();
    assert!(kinds.contains(&NotificationKind::ReservationCreated));
    assert!(kinds.contains(&NotificationKind::PaymentReceived));
    assert!(kinds.contains(&NotificationKind::CheckIn));
    assert!(kinds.contains(&NotificationKind::CheckOut));

    let payments = reservations
        .payments_for(&desk.admin, reservation.id)
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].method, "card");
}

#[tokio::test]
async fn test_room_from_another_hotel_cannot_be_booked() {
    let desk = desk().await;
    let (plaza, _) = hotel_with_rooms(&desk, "Plaza", 100.0).await;
    let (_, marina_rooms) = hotel_with_rooms(&desk, "Marina", 100.0).await;
    let reservations = desk.services.reservations();

    let mut input = booking(&marina_rooms[0], day(1, 15), day(2, 11));
    input.hotel_id = plaza.id;
    let result = reservations.create_reservation(&desk.admin, input).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let stored = reservations
        .reservations_for_hotel(&desk.admin, plaza.id)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_reservation_cannot_move_to_another_hotel() {
    let desk = desk().await;
    let (_, plaza_rooms) = hotel_with_rooms(&desk, "Plaza", 100.0).await;
    let (_, marina_rooms) = hotel_with_rooms(&desk, "Marina", 100.0).await;
    let reservations = desk.services.reservations();

    let reservation = reservations
        .create_reservation(&desk.admin, booking(&plaza_rooms[0], day(1, 15), day(3, 11)))
        .await
        .unwrap();
    reservations.check_in(&desk.admin, reservation.id).await.unwrap();

    let moved = reservations
        .move_reservation(&desk.admin, reservation.id, marina_rooms[0].id)
        .await;
    assert!(matches!(moved, Err(AppError::Validation(_))));

    let unchanged = reservations
        .get_reservation(&desk.admin, reservation.id)
        .await
        .unwrap();
    assert_eq!(unchanged.room_id, plaza_rooms[0].id);
    let marina_room = desk
        .services
        .rooms()
        .get_room(&desk.admin, marina_rooms[0].id)
        .await
        .unwrap();
    assert_eq!(marina_room.status, RoomStatus::Available);
    let plaza_room = desk
        .services
        .rooms()
        .get_room(&desk.admin, plaza_rooms[0].id)
        .await
        .unwrap();
    assert_eq!(plaza_room.status, RoomStatus::Occupied);
}

#[tokio::test]
async fn test_non_finite_amounts_are_rejected() {
    let desk = desk().await;
    let (hotel, rooms) = hotel_with_rooms(&desk, "Hotel H", 100.0).await;
    let reservations = desk.services.reservations();

    let mut input = booking(&rooms[0], day(1, 15), day(3, 11));
    input.total_override = Some(f64::NAN);
    let nan_total = reservations.create_reservation(&desk.admin, input).await;
    assert!(matches!(nan_total, Err(AppError::Validation(_))));

    let mut input = booking(&rooms[0], day(1, 15), day(3, 11));
    input.total_override = Some(f64::INFINITY);
    let infinite_total = reservations.create_reservation(&desk.admin, input).await;
    assert!(matches!(infinite_total, Err(AppError::Validation(_))));

    let nan_room = desk
        .services
        .rooms()
        .create_room(&desk.admin, hotel.id, new_room("103", f64::NAN))
        .await;
    assert!(matches!(nan_room, Err(AppError::Validation(_))));

    let repriced = desk
        .services
        .rooms()
        .update_room(
            &desk.admin,
            rooms[1].id,
            RoomUpdate {
                nightly_price: Some(f64::INFINITY),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(repriced, Err(AppError::Validation(_))));

    let reservation = reservations
        .create_reservation(&desk.admin, booking(&rooms[0], day(1, 15), day(3, 11)))
        .await
        .unwrap();
    assert_eq!(reservation.total_amount, 200.0);
    let infinite_payment = reservations
        .record_payment(
            &desk.admin,
            reservation.id,
            NewPayment {
                amount: f64::INFINITY,
                method: None,
            },
        )
        .await;
    assert!(matches!(infinite_payment, Err(AppError::Validation(_))));
}
