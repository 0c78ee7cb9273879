//! Batch export command for the dashboard pipeline.
//!
//! Runs the same row fetch and the same computation pipeline as the
//! interactive report, then hands the finished aggregates to the exporter.

use crate::commands::report::FilterArgs;
use crate::db::documents::Documents;
use crate::libs::config::Config;
use crate::libs::export::{ExportData, ExportFormat, Exporter};
use crate::libs::messages::Message;
use crate::libs::metrics::Metric;
use crate::libs::report::CycleTimeRequest;
use crate::msg_info;
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Breakdown to export
    #[arg(value_enum, default_value = "daily")]
    data: ExportData,

    /// Metric to export
    #[arg(short, long, value_enum, default_value = "received-to-open")]
    metric: Metric,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Custom output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    filter: FilterArgs,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let filter = args.filter.to_filter(Local::now().date_naive())?;

    msg_info!(Message::ExportingData(format!("{:?}", args.data), format!("{:?}", args.format)));

    let rows = Documents::new()?.fetch(&filter)?;
    let request = CycleTimeRequest::from_config(args.metric, &config)?;
    let exporter = Exporter::new(args.format, args.output);

    match args.data {
        ExportData::Daily => exporter.export_daily(&request.build_daily(&rows)?),
        ExportData::Bulk => exporter.export_bulk(&request.build_bulk(&rows)?),
    }
}
