#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError,
    ConfigSaveError,
    ConfigModuleCalendar,
    ConfigModuleMetrics,
    PromptSelectModules,
    PromptOpenTime,
    PromptCloseTime,
    PromptCeiling(String), // metric label

    // === REPORT MESSAGES ===
    ReportHeader(String, String, String), // metric, start date, end date
    NoDocumentsFound,
    OverallSummary(f64, usize), // median minutes, count
    OutcomeBreakdownUnavailable,

    // === EXPORT MESSAGES ===
    ExportingData(String, String), // data kind, format
    ExportSuccess(String),         // output path

    // === VALIDATION MESSAGES ===
    InvalidDate(String),
    InvalidTime(String),
    InvalidDateRange(String, String),
    InvalidCalendarWindow(String, String),
}
