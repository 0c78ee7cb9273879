//! # Cyclet - Cycle Time Analytics for Document Intake
//!
//! A command-line utility for computing business-hours cycle time metrics
//! over a local store of document-intake records and aggregating them into
//! per-day, per-supplier and per-organization reports.
//!
//! ## Features
//!
//! - **Business Calendar**: weekday window with configurable hours; elapsed
//!   time outside the window never counts
//! - **Cycle Time Metrics**: received-to-open (business and raw variants)
//!   and processing time, each with its own outlier ceiling
//! - **Aggregation**: per-group medians plus a true overall median, with
//!   deterministic ordering
//! - **Reports and Exports**: terminal tables and CSV/JSON/Excel files
//!   produced from one shared computation pipeline
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cyclet::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
