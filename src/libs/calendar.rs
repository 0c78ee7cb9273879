//! Business-hours calendar used for cycle time clipping.
//!
//! This module defines the recurring weekly window during which elapsed time
//! "counts" for cycle time metrics, and answers the single question the
//! duration calculator needs: move this instant forward or backward to the
//! nearest business boundary.
//!
//! ## Window Definition
//!
//! The window is open Monday through Friday between a configurable opening
//! and closing time (08:00 to 18:00 by default, i.e. 600 business minutes per
//! open day). Saturday and Sunday are always closed. There is no holiday
//! support; the window repeats identically every week.
//!
//! ## Clipping Rules
//!
//! - `clip_forward` advances an instant to the next open moment, or leaves
//!   it untouched when it is already inside the window.
//! - `clip_backward` retreats an instant to the previous close, symmetric
//!   to `clip_forward`.
//!
//! Both operations are total and idempotent: clipping an already-clipped
//! instant returns it unchanged.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};

/// The recurring Monday-to-Friday business window with configurable hours.
///
/// Times are naive: every instant in the system is assumed to already be
/// normalized to a single time zone before it reaches the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    /// Opening time on each open day.
    pub open: NaiveTime,
    /// Closing time on each open day. Must be later than `open`.
    pub close: NaiveTime,
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        BusinessCalendar {
            open: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        }
    }
}

impl BusinessCalendar {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        BusinessCalendar { open, close }
    }

    /// Number of business minutes contributed by one full open day.
    pub fn minutes_per_day(&self) -> i64 {
        (self.close - self.open).num_minutes()
    }

    fn is_open_day(weekday: Weekday) -> bool {
        !matches!(weekday, Weekday::Sat | Weekday::Sun)
    }

    /// Whether an instant lies strictly inside the business window.
    ///
    /// The opening instant is inside, the closing instant is not. This
    /// mirrors the clipping rules: `close` is where `clip_backward` lands
    /// and therefore belongs to the end boundary, not to the open interval.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        Self::is_open_day(instant.weekday()) && instant.time() >= self.open && instant.time() < self.close
    }

    /// Moves an instant forward to the nearest business-open moment.
    ///
    /// Returns the instant unchanged when it already falls inside the window.
    pub fn clip_forward(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let day = instant.date();
        match instant.weekday() {
            // Sunday -> next Monday at opening
            Weekday::Sun => (day + Duration::days(1)).and_time(self.open),
            // Saturday -> next Monday at opening
            Weekday::Sat => (day + Duration::days(2)).and_time(self.open),
            // Friday after closing -> next Monday at opening
            Weekday::Fri if instant.time() >= self.close => (day + Duration::days(3)).and_time(self.open),
            // Other weekday after closing -> next day at opening
            _ if instant.time() >= self.close => (day + Duration::days(1)).and_time(self.open),
            // Before opening -> same day at opening
            _ if instant.time() < self.open => day.and_time(self.open),
            // During business hours: keep as-is
            _ => instant,
        }
    }

    /// Moves an instant backward to the nearest business-open moment.
    ///
    /// Symmetric to [`clip_forward`](Self::clip_forward): weekend and
    /// before-opening instants land on the previous closing boundary.
    pub fn clip_backward(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let day = instant.date();
        match instant.weekday() {
            // Sunday -> previous Friday at closing
            Weekday::Sun => (day - Duration::days(2)).and_time(self.close),
            // Saturday -> previous Friday at closing
            Weekday::Sat => (day - Duration::days(1)).and_time(self.close),
            // Monday before opening -> previous Friday at closing
            Weekday::Mon if instant.time() < self.open => (day - Duration::days(3)).and_time(self.close),
            // Other weekday before opening -> previous day at closing
            _ if instant.time() < self.open => (day - Duration::days(1)).and_time(self.close),
            // After closing -> same day at closing
            _ if instant.time() >= self.close => day.and_time(self.close),
            // During business hours: keep as-is
            _ => instant,
        }
    }
}
