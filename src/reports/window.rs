//! Calendar window a report is computed over.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::errors::{AppError, AppResult};

/// Inclusive `[start, end]` range of calendar days (UTC).
///
/// Occupancy measures nights between the start of `start` and the start of
/// `end`; day-by-day breakdowns and check-in filters cover every day up to and
/// including `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::validation("Report end date precedes its start date"));
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Nights between the two boundary midnights
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Every day of the window, both endpoints included
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn start_instant(&self) -> DateTime<Utc> {
        midnight(self.start)
    }

    pub fn end_instant(&self) -> DateTime<Utc> {
        midnight(self.end)
    }

    /// Whether `at` falls on one of the window's days
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.start <= day && day <= self.end
    }
}

pub(crate) fn midnight(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}
