//! Collected payments by method and by day.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::window::ReportWindow;
use crate::domain::{Payment, Reservation};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodTotal {
    pub amount: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPayments {
    pub date: NaiveDate,
    pub amount: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReport {
    pub window: ReportWindow,
    pub total_payments: f64,
    pub total_transactions: usize,
    pub average_transaction: f64,
    pub payments_by_method: BTreeMap<String, MethodTotal>,
    pub daily_payments: Vec<DailyPayments>,
}

/// Payments processed during the window against any of `reservations`.
pub fn payment_report(
    reservations: &[Reservation],
    payments: &[Payment],
    window: &ReportWindow,
) -> PaymentReport {
    let reservation_ids: HashSet<Uuid> = reservations.iter().map(|reservation| reservation.id).collect();
    let collected: Vec<&Payment> = payments
        .iter()
        .filter(|payment| reservation_ids.contains(&payment.reservation_id))
        .filter(|payment| window.contains(payment.processed_at))
        .collect();

    let mut payments_by_method: BTreeMap<String, MethodTotal> = BTreeMap::new();
    for payment in &collected {
        let entry = payments_by_method.entry(payment.method.clone()).or_default();
        entry.amount += payment.amount;
        entry.count += 1;
    }

    let total_payments: f64 = collected.iter().map(|payment| payment.amount).sum();
    let average_transaction = if collected.is_empty() {
        0.0
    } else {
        total_payments / collected.len() as f64
    };

    let daily_payments = window
        .days()
        .map(|date| {
            let (amount, count) = collected
                .iter()
                .filter(|payment| payment.processed_at.date_naive() == date)
                .fold((0.0, 0), |(amount, count), payment| (amount + payment.amount, count + 1));
            DailyPayments { date, amount, count }
        })
        .collect();

    PaymentReport {
        window: *window,
        total_payments,
        total_transactions: collected.len(),
        average_transaction,
        payments_by_method,
        daily_payments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomType;
    use crate::reports::fixtures::{at, booking, day, room};

    fn paid_on(reservation: &Reservation, amount: f64, method: &str, d: u32) -> Payment {
        let mut payment = Payment::completed(reservation.id, amount, method.to_string(), Uuid::nil());
        payment.processed_at = at(d, 10);
        payment
    }

    #[test]
    fn test_totals_by_method_and_day() {
        let standard = room(Uuid::new_v4(), "101", RoomType::Standard, 100.0);
        let first = booking(&standard, at(1, 15), at(3, 11));
        let second = booking(&standard, at(4, 15), at(5, 11));
        let payments = vec![
            paid_on(&first, 200.0, "cash", 2),
            paid_on(&second, 100.0, "card", 2),
            paid_on(&second, 50.0, "cash", 3),
        ];
        let window = ReportWindow::new(day(1), day(3)).unwrap();

        let report = payment_report(&[first, second], &payments, &window);

        assert_eq!(report.total_payments, 350.0);
        assert_eq!(report.total_transactions, 3);
        assert_eq!(report.payments_by_method["cash"], MethodTotal { amount: 250.0, count: 2 });
        assert_eq!(report.payments_by_method["card"].count, 1);
        assert_eq!(report.daily_payments[1].amount, 300.0);
        assert_eq!(report.daily_payments[2].count, 1);
    }

    #[test]
    fn test_ignores_other_hotels_and_dates() {
        let standard = room(Uuid::new_v4(), "101", RoomType::Standard, 100.0);
        let ours = booking(&standard, at(1, 15), at(3, 11));
        let theirs = booking(&standard, at(1, 15), at(3, 11));
        let payments = vec![paid_on(&theirs, 200.0, "cash", 2), paid_on(&ours, 80.0, "cash", 9)];
        let window = ReportWindow::new(day(1), day(3)).unwrap();

        let report = payment_report(&[ours], &payments, &window);

        assert_eq!(report.total_transactions, 0);
        assert_eq!(report.average_transaction, 0.0);
    }
}
