//! Core library modules for the cyclet application.
//!
//! - **Metrics core**: business calendar clipping, duration calculation and
//!   statistical aggregation (`calendar`, `duration`, `aggregate`, `metrics`)
//! - **Pipeline**: the shared report computation both commands invoke
//!   (`report`)
//! - **Infrastructure**: configuration, data storage paths, messaging
//! - **Presentation**: console tables, duration formatting, file export

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod data_storage;
pub mod duration;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod metrics;
pub mod report;
pub mod view;
