//! Display implementation for cyclet application messages.
//!
//! Converts structured [`Message`](super::Message) values into the
//! human-readable text shown on the terminal. Keeping all user-facing text
//! in one place keeps wording consistent between the commands and makes the
//! messages easy to audit.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => write!(f, "Configuration saved successfully"),
            Message::ConfigParseError => write!(f, "Failed to parse configuration file"),
            Message::ConfigSaveError => write!(f, "Failed to save configuration file"),
            Message::ConfigModuleCalendar => write!(f, "Business calendar"),
            Message::ConfigModuleMetrics => write!(f, "Metric thresholds"),
            Message::PromptSelectModules => write!(f, "Select modules to configure"),
            Message::PromptOpenTime => write!(f, "Business day opening time (HH:MM)"),
            Message::PromptCloseTime => write!(f, "Business day closing time (HH:MM)"),
            Message::PromptCeiling(metric) => write!(f, "Outlier ceiling in minutes for {}", metric),

            // === REPORT MESSAGES ===
            Message::ReportHeader(metric, start, end) => {
                write!(f, "📊 Cycle time report: {} ({} to {})", metric, start, end)
            }
            Message::NoDocumentsFound => write!(f, "No documents matched the filter; showing an empty report"),
            Message::OverallSummary(median, count) => {
                write!(f, "Overall median: {:.2} minutes across {} documents", median, count)
            }
            Message::OutcomeBreakdownUnavailable => {
                write!(f, "This store has no outcome categories; outcomes are grouped coarsely")
            }

            // === EXPORT MESSAGES ===
            Message::ExportingData(data, format) => write!(f, "Exporting {} data in {} format...", data, format),
            Message::ExportSuccess(path) => write!(f, "Data exported successfully to: {}", path),

            // === VALIDATION MESSAGES ===
            Message::InvalidDate(value) => write!(f, "Invalid date '{}', expected YYYY-MM-DD", value),
            Message::InvalidTime(value) => write!(f, "Invalid time '{}', expected HH:MM", value),
            Message::InvalidDateRange(start, end) => {
                write!(f, "Invalid date range: start {} is after end {}", start, end)
            }
            Message::InvalidCalendarWindow(open, close) => {
                write!(f, "Invalid business window: opening {} is not before closing {}", open, close)
            }
        }
    }
}
