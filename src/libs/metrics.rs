//! Catalogue of named cycle time metrics.
//!
//! Each metric names the pair of document timestamps it measures, whether the
//! elapsed time is counted in business minutes or raw wall-clock minutes, and
//! a default outlier ceiling beyond which a record is treated as data-quality
//! noise. The business-hours and raw variants of received-to-open are two
//! distinct metrics with independent ceilings; they are never expected to
//! agree on overlapping inputs.

use crate::db::documents::DocumentRow;
use crate::libs::calendar::BusinessCalendar;
use crate::libs::duration;

/// A named cycle time metric selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Metric {
    /// Received to first open, counted in business minutes.
    ReceivedToOpen,
    /// Received to first open, raw wall-clock minutes.
    ReceivedToOpenRaw,
    /// First open to last intake update, raw minutes.
    Processing,
}

impl Metric {
    /// Stable identifier used in export payloads and report headers.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::ReceivedToOpen => "received_to_open",
            Metric::ReceivedToOpenRaw => "received_to_open_raw",
            Metric::Processing => "processing",
        }
    }

    /// Default outlier ceiling in minutes.
    ///
    /// Roughly two business weeks for the business-hours variant, one
    /// calendar week for the raw variant, one day for processing time.
    /// These are policy defaults; the config file can override them.
    pub fn default_ceiling(&self) -> i64 {
        match self {
            Metric::ReceivedToOpen => 6_000,
            Metric::ReceivedToOpenRaw => 10_080,
            Metric::Processing => 1_440,
        }
    }

    /// Measures this metric for one document row.
    ///
    /// Returns `None` when the row lacks an endpoint the metric needs, so
    /// half-processed documents drop out before aggregation.
    pub fn minutes(&self, calendar: &BusinessCalendar, row: &DocumentRow) -> Option<i64> {
        match self {
            Metric::ReceivedToOpen => {
                let opened = row.first_accessed_at?;
                Some(duration::business_minutes(calendar, row.created_at, opened))
            }
            Metric::ReceivedToOpenRaw => {
                let opened = row.first_accessed_at?;
                Some(duration::raw_minutes(row.created_at, opened))
            }
            Metric::Processing => {
                let opened = row.first_accessed_at?;
                let updated = row.intake_updated_at?;
                Some(duration::raw_minutes(opened, updated))
            }
        }
    }
}
