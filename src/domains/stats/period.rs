//! Calendar windows for period-over-period comparisons.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive `[start, end]` calendar-date window.
///
/// Windows are plain values; deriving one from another (previous period,
/// month boundaries) is pure arithmetic and never touches a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window length in days, both bounds included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The immediately preceding window of the same length:
    /// `[start - len, start - 1 day]`. Adjacent and non-overlapping.
    pub fn previous(&self) -> PeriodWindow {
        let len = self.len_days();
        PeriodWindow {
            start: self.start - Duration::days(len),
            end: self.start - Duration::days(1),
        }
    }

    /// Whether a date falls inside the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The window as a half-open UTC timestamp range
    /// `[start 00:00, (end + 1 day) 00:00)`, so the end date's final
    /// instant is included when filtering timestamped records.
    pub fn timestamp_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start.and_time(NaiveTime::MIN).and_utc();
        let end_exclusive = self
            .end
            .succ_opt()
            .unwrap_or(self.end)
            .and_time(NaiveTime::MIN)
            .and_utc();
        (start, end_exclusive)
    }

    /// The trailing window of `days` days ending on `today`, inclusive.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        PeriodWindow {
            start: today - Duration::days(days.max(1) - 1),
            end: today,
        }
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        PeriodWindow { start, end }
    }

    /// The calendar month immediately before the one containing `date`.
    pub fn previous_calendar_month(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last_of_previous = first.pred_opt().unwrap_or(first);
        Self::month_of(last_of_previous)
    }
}
