//! Configuration management for the cyclet application.
//!
//! Settings live in a JSON file in the platform data directory and cover the
//! two policy knobs of the metrics core: the business calendar window and the
//! per-metric outlier ceilings. Both are optional modules; a missing module
//! means defaults, so a fresh install works without running `init`.
//!
//! The window hours and ceilings are configuration rather than constants so
//! the core stays testable with alternate calendars and thresholds without
//! code changes.

use crate::libs::aggregate::ValidRange;
use crate::libs::calendar::BusinessCalendar;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::metrics::Metric;
use crate::{msg_bail_anyhow, msg_error_anyhow};
use anyhow::Result;
use chrono::NaiveTime;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Business calendar window settings, stored as HH:MM strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CalendarConfig {
    pub open: String,
    pub close: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            open: "08:00".to_string(),
            close: "18:00".to_string(),
        }
    }
}

impl CalendarConfig {
    /// Parses the configured window into a [`BusinessCalendar`].
    pub fn calendar(&self) -> Result<BusinessCalendar> {
        let open = parse_time(&self.open)?;
        let close = parse_time(&self.close)?;
        if open >= close {
            msg_bail_anyhow!(Message::InvalidCalendarWindow(self.open.clone(), self.close.clone()));
        }
        Ok(BusinessCalendar::new(open, close))
    }
}

/// Per-metric outlier ceilings in minutes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MetricThresholds {
    pub received_to_open: i64,
    pub received_to_open_raw: i64,
    pub processing: i64,
}

impl Default for MetricThresholds {
    fn default() -> Self {
        MetricThresholds {
            received_to_open: Metric::ReceivedToOpen.default_ceiling(),
            received_to_open_raw: Metric::ReceivedToOpenRaw.default_ceiling(),
            processing: Metric::Processing.default_ceiling(),
        }
    }
}

impl MetricThresholds {
    pub fn ceiling(&self, metric: Metric) -> i64 {
        match metric {
            Metric::ReceivedToOpen => self.received_to_open,
            Metric::ReceivedToOpenRaw => self.received_to_open_raw,
            Metric::Processing => self.processing,
        }
    }
}

/// Main configuration container.
///
/// Each module is optional so users only persist what they changed; absent
/// modules fall back to defaults at the point of use.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricThresholds>,
}

impl Config {
    /// Loads the configuration file, or returns defaults when none exists.
    pub fn read() -> Result<Self> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|_| msg_error_anyhow!(Message::ConfigParseError))
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let file = File::create(&path).map_err(|_| msg_error_anyhow!(Message::ConfigSaveError))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Interactive configuration wizard.
    pub fn init() -> Result<Self> {
        let mut config = Config::read()?;
        let theme = ColorfulTheme::default();

        let modules = [Message::ConfigModuleCalendar.to_string(), Message::ConfigModuleMetrics.to_string()];
        let selected = MultiSelect::with_theme(&theme)
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .interact()?;

        for index in selected {
            match index {
                0 => config.calendar = Some(Self::init_calendar(&theme, config.calendar.unwrap_or_default())?),
                1 => config.metrics = Some(Self::init_metrics(&theme, config.metrics.unwrap_or_default())?),
                _ => {}
            }
        }
        Ok(config)
    }

    fn init_calendar(theme: &ColorfulTheme, current: CalendarConfig) -> Result<CalendarConfig> {
        let open: String = Input::with_theme(theme)
            .with_prompt(Message::PromptOpenTime.to_string())
            .default(current.open)
            .interact_text()?;
        let close: String = Input::with_theme(theme)
            .with_prompt(Message::PromptCloseTime.to_string())
            .default(current.close)
            .interact_text()?;

        let config = CalendarConfig { open, close };
        // Surface malformed input immediately instead of at first report.
        config.calendar()?;
        Ok(config)
    }

    fn init_metrics(theme: &ColorfulTheme, current: MetricThresholds) -> Result<MetricThresholds> {
        let received_to_open: i64 = Input::with_theme(theme)
            .with_prompt(Message::PromptCeiling(Metric::ReceivedToOpen.label().to_string()).to_string())
            .default(current.received_to_open)
            .interact_text()?;
        let received_to_open_raw: i64 = Input::with_theme(theme)
            .with_prompt(Message::PromptCeiling(Metric::ReceivedToOpenRaw.label().to_string()).to_string())
            .default(current.received_to_open_raw)
            .interact_text()?;
        let processing: i64 = Input::with_theme(theme)
            .with_prompt(Message::PromptCeiling(Metric::Processing.label().to_string()).to_string())
            .default(current.processing)
            .interact_text()?;

        Ok(MetricThresholds {
            received_to_open,
            received_to_open_raw,
            processing,
        })
    }

    /// Effective business calendar: configured hours or the default window.
    pub fn business_calendar(&self) -> Result<BusinessCalendar> {
        match &self.calendar {
            Some(calendar) => calendar.calendar(),
            None => Ok(BusinessCalendar::default()),
        }
    }

    /// Effective validity range for one metric.
    pub fn valid_range(&self, metric: Metric) -> Result<ValidRange> {
        let ceiling = self.metrics.clone().unwrap_or_default().ceiling(metric);
        Ok(ValidRange::new(0, ceiling)?)
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| msg_error_anyhow!(Message::InvalidTime(value.to_string())))
}
