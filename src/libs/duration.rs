//! Elapsed business-minute calculation between two raw instants.
//!
//! Both endpoints are clipped into the business window first, then the
//! elapsed time is decomposed into a partial first day, a partial last day
//! and the full open days strictly between them. The full-day count uses a
//! closed-form weekday formula instead of scanning every calendar day, so
//! the cost does not grow with the span of the interval.

use crate::libs::calendar::BusinessCalendar;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Business minutes elapsed between `raw_start` and `raw_end`.
///
/// Inverted or fully out-of-window intervals resolve to zero rather than an
/// error: a document opened before it was received, or received and opened
/// inside the same weekend gap, simply contributes no business time.
pub fn business_minutes(calendar: &BusinessCalendar, raw_start: NaiveDateTime, raw_end: NaiveDateTime) -> i64 {
    let biz_start = calendar.clip_forward(raw_start);
    let biz_end = calendar.clip_backward(raw_end);

    if biz_start >= biz_end {
        return 0;
    }
    if biz_start.date() == biz_end.date() {
        return (biz_end - biz_start).num_minutes();
    }

    // Partial first day: biz_start up to that day's closing.
    let first_day = (biz_start.date().and_time(calendar.close) - biz_start).num_minutes();
    // Partial last day: opening up to biz_end.
    let last_day = (biz_end - biz_end.date().and_time(calendar.open)).num_minutes();
    // Full open days strictly between the two dates.
    let full_days = weekdays_strictly_between(biz_start.date(), biz_end.date());

    first_day + last_day + full_days * calendar.minutes_per_day()
}

/// Raw wall-clock minutes between two instants, floored at zero.
///
/// Used by the non-business variant of received-to-open, which ignores the
/// calendar entirely and relies on its own outlier ceiling instead.
pub fn raw_minutes(raw_start: NaiveDateTime, raw_end: NaiveDateTime) -> i64 {
    (raw_end - raw_start).num_minutes().max(0)
}

/// Closed-form count of weekdays strictly between two dates.
///
/// With `gap` calendar days strictly between `start` and `end`, the count is
/// `full_weeks * 5` plus the remainder days minus however many of those
/// remainder days fall on a weekend. The remainder window begins the day
/// after `start`, so the weekend overlap is `remainder - 5 + dow(start)`
/// clamped to `0..=2`, with `dow` counted 1=Mon..7=Sun.
///
/// `start` is expected to be a clipped (weekday) date. The formula matches a
/// day-by-day scan for every non-negative gap; the tests cross-check it
/// against one.
pub fn weekdays_strictly_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let gap = (end - start).num_days() - 1;
    if gap <= 0 {
        return 0;
    }
    let full_weeks = gap / 7;
    let remainder = gap % 7;
    let dow = start.weekday().number_from_monday() as i64;
    let weekend_in_remainder = (remainder - 5 + dow).clamp(0, 2);

    full_weeks * 5 + remainder - weekend_in_remainder
}
