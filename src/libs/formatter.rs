//! Duration formatting utilities for table display.
//!
//! Medians are carried through the pipeline as fractional minutes; the
//! tables show them both as minutes (2 decimals, the export convention) and
//! as an "HH:MM" figure for quick reading. Negative values never reach the
//! formatter, but it floors at zero anyway.

/// Formats whole minutes as "HH:MM".
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Formats a fractional median as "HH:MM", rounding to the nearest minute.
pub fn format_median(median_minutes: f64) -> String {
    format_minutes(median_minutes.round() as i64)
}
