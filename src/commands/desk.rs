//! Front desk commands over the selected hotel.

use crate::cli::args::{MoveArgs, PayArgs, ReserveArgs, RoomStatusArgs, StayArgs};
use crate::cli::DeskCommand;
use crate::config::{CHECK_IN_HOUR, CHECK_OUT_HOUR};
use crate::domain::{NewPayment, NewReservation, Payment, Reservation, Room};
use crate::errors::AppResult;
use crate::services::ServiceContainer;

use super::{at_hour, emit, notifications, report, Session};

pub async fn execute(session: &Session, command: DeskCommand) -> AppResult<bool> {
    let reservations = session.services.reservations();
    let user = &session.user;

    match command {
        DeskCommand::Hotels => emit(session.services.hotels().hotels_for_user(user).await),
        DeskCommand::Rooms => emit(room_board(session).await),
        DeskCommand::Available(args) => emit(available(session, args).await),
        DeskCommand::Reserve(args) => emit(reserve(session, args).await),
        DeskCommand::CheckIn(arg) => emit(reservations.check_in(user, arg.reservation).await),
        DeskCommand::CheckOut(arg) => emit(reservations.check_out(user, arg.reservation).await),
        DeskCommand::Pay(args) => emit(pay(session, args).await),
        DeskCommand::Cancel(arg) => {
            emit(reservations.cancel_reservation(user, arg.reservation).await)
        }
        DeskCommand::Extend(args) => emit(
            reservations
                .extend_stay(user, args.reservation, at_hour(args.to, CHECK_OUT_HOUR))
                .await,
        ),
        DeskCommand::Move(args) => emit(move_to(session, args).await),
        DeskCommand::RoomStatus(args) => emit(room_status(session, args).await),
        DeskCommand::Report(args) => report::execute(session, args).await,
        DeskCommand::Notifications(args) => notifications::execute(session, args).await,
    }
}

async fn room_board(session: &Session) -> AppResult<Vec<Room>> {
    let hotel = session.hotel().await?;
    session.services.rooms().rooms(&session.user, hotel.id).await
}

async fn available(session: &Session, args: StayArgs) -> AppResult<Vec<Room>> {
    let hotel = session.hotel().await?;
    session
        .services
        .rooms()
        .available_rooms(
            &session.user,
            hotel.id,
            at_hour(args.from, CHECK_IN_HOUR),
            at_hour(args.to, CHECK_OUT_HOUR),
        )
        .await
}

async fn reserve(session: &Session, args: ReserveArgs) -> AppResult<Reservation> {
    let hotel = session.hotel().await?;
    let room = session.room(hotel.id, &args.room).await?;

    let input = NewReservation {
        hotel_id: hotel.id,
        room_id: room.id,
        guest_name: args.guest,
        guest_email: args.guest_email,
        guest_phone: args.phone,
        number_of_guests: args.guests,
        check_in: at_hour(args.stay.from, CHECK_IN_HOUR),
        check_out: at_hour(args.stay.to, CHECK_OUT_HOUR),
        total_override: args.total,
    };
    session
        .services
        .reservations()
        .create_reservation(&session.user, input)
        .await
}

async fn pay(session: &Session, args: PayArgs) -> AppResult<Payment> {
    let input = NewPayment {
        amount: args.amount,
        method: args.method,
    };
    session
        .services
        .reservations()
        .record_payment(&session.user, args.reservation, input)
        .await
}

async fn move_to(session: &Session, args: MoveArgs) -> AppResult<Reservation> {
    let reservations = session.services.reservations();
    let reservation = reservations
        .get_reservation(&session.user, args.reservation)
        .await?;
    let room = session.room(reservation.hotel_id, &args.room).await?;

    reservations
        .move_reservation(&session.user, reservation.id, room.id)
        .await
}

async fn room_status(session: &Session, args: RoomStatusArgs) -> AppResult<Room> {
    let hotel = session.hotel().await?;
    let room = session.room(hotel.id, &args.room).await?;
    session
        .services
        .rooms()
        .set_room_status(&session.user, room.id, args.status)
        .await
}
