//! Batch export of cycle time reports.
//!
//! Writes the same aggregates the interactive report shows into CSV, JSON or
//! Excel files for the external dashboard pipeline. The exporter never
//! recomputes anything: it receives a finished [`CycleTimeReport`] or
//! [`BulkReport`] from the shared pipeline and only handles shaping and file
//! output, which keeps the batch path numerically identical to the
//! interactive one by construction.

use crate::libs::messages::Message;
use crate::libs::report::{BulkReport, CycleTimeReport};
use crate::msg_success;
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Supported export output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values for spreadsheet tools.
    Csv,
    /// Pretty-printed JSON for programmatic consumers.
    Json,
    /// Excel workbook with formatted headers.
    Excel,
}

/// Which breakdown to export.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportData {
    /// Per-day, per-supplier buckets with the overall median.
    Daily,
    /// Per-organization bulk breakdown with per-organization medians.
    Bulk,
}

/// One exported daily bucket; all fields pre-formatted as strings or plain
/// numbers so every output format renders identically.
#[derive(Debug, Serialize)]
pub struct ExportBucketRow {
    pub date: String,
    pub supplier_id: String,
    pub median_minutes: f64,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ExportBulkRow {
    pub organization_id: String,
    pub date: String,
    pub supplier_id: String,
    pub median_minutes: f64,
    pub count: usize,
}

/// Serializable shape of a daily report.
#[derive(Debug, Serialize)]
pub struct ExportDailyReport {
    pub metric: String,
    pub rows: Vec<ExportBucketRow>,
    pub overall_median_minutes: f64,
    pub overall_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ExportOrgOverall {
    pub organization_id: String,
    pub median_minutes: f64,
    pub count: usize,
}

/// Serializable shape of a bulk report.
#[derive(Debug, Serialize)]
pub struct ExportBulkReport {
    pub metric: String,
    pub rows: Vec<ExportBulkRow>,
    pub overall_by_org: Vec<ExportOrgOverall>,
}

impl ExportDailyReport {
    pub fn from_report(report: &CycleTimeReport) -> Self {
        ExportDailyReport {
            metric: report.metric.label().to_string(),
            rows: report
                .buckets
                .iter()
                .map(|bucket| ExportBucketRow {
                    date: bucket.key.date.format("%Y-%m-%d").to_string(),
                    supplier_id: bucket.key.supplier_id.clone(),
                    median_minutes: bucket.median_minutes,
                    count: bucket.count,
                })
                .collect(),
            overall_median_minutes: report.overall.median_minutes,
            overall_count: report.overall.count,
        }
    }
}

impl ExportBulkReport {
    pub fn from_report(report: &BulkReport) -> Self {
        ExportBulkReport {
            metric: report.metric.label().to_string(),
            rows: report
                .buckets
                .iter()
                .map(|bucket| ExportBulkRow {
                    organization_id: bucket.key.organization_id.clone(),
                    date: bucket.key.date.format("%Y-%m-%d").to_string(),
                    supplier_id: bucket.key.supplier_id.clone(),
                    median_minutes: bucket.median_minutes,
                    count: bucket.count,
                })
                .collect(),
            overall_by_org: report
                .overall_by_org
                .iter()
                .map(|(organization_id, stats)| ExportOrgOverall {
                    organization_id: organization_id.clone(),
                    median_minutes: stats.median_minutes,
                    count: stats.count,
                })
                .collect(),
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter; generates a timestamped default filename when no
    /// output path is given.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("cyclet_export_{}", Local::now().format("%Y%m%d_%H%M%S"));

        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        };

        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, extension)));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    pub fn export_daily(&self, report: &CycleTimeReport) -> Result<()> {
        let data = ExportDailyReport::from_report(report);

        match self.format {
            ExportFormat::Csv => self.export_daily_csv(&data)?,
            ExportFormat::Json => self.export_json(&data)?,
            ExportFormat::Excel => self.export_daily_excel(&data)?,
        }

        msg_success!(Message::ExportSuccess(self.output_path.display().to_string()));
        Ok(())
    }

    pub fn export_bulk(&self, report: &BulkReport) -> Result<()> {
        let data = ExportBulkReport::from_report(report);

        match self.format {
            ExportFormat::Csv => self.export_bulk_csv(&data)?,
            ExportFormat::Json => self.export_json(&data)?,
            ExportFormat::Excel => self.export_bulk_excel(&data)?,
        }

        msg_success!(Message::ExportSuccess(self.output_path.display().to_string()));
        Ok(())
    }

    fn export_json<T: Serialize>(&self, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_daily_csv(&self, data: &ExportDailyReport) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record(["Date", "Supplier", "Median Minutes", "Count"])?;
        for row in &data.rows {
            wtr.write_record([
                row.date.clone(),
                row.supplier_id.clone(),
                format!("{:.2}", row.median_minutes),
                row.count.to_string(),
            ])?;
        }

        wtr.write_record(["", "", "", ""])?;
        wtr.write_record(["Metric", &data.metric, "", ""])?;
        wtr.write_record(["Overall Median", &format!("{:.2}", data.overall_median_minutes), "", ""])?;
        wtr.write_record(["Overall Count", &data.overall_count.to_string(), "", ""])?;

        wtr.flush()?;
        Ok(())
    }

    fn export_bulk_csv(&self, data: &ExportBulkReport) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record(["Organization", "Date", "Supplier", "Median Minutes", "Count"])?;
        for row in &data.rows {
            wtr.write_record([
                row.organization_id.clone(),
                row.date.clone(),
                row.supplier_id.clone(),
                format!("{:.2}", row.median_minutes),
                row.count.to_string(),
            ])?;
        }

        wtr.write_record(["", "", "", "", ""])?;
        wtr.write_record(["ORGANIZATION OVERALL", "", "", "", ""])?;
        for overall in &data.overall_by_org {
            wtr.write_record([
                overall.organization_id.clone(),
                "".to_string(),
                "".to_string(),
                format!("{:.2}", overall.median_minutes),
                overall.count.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_daily_excel(&self, data: &ExportDailyReport) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        worksheet.write_string_with_format(0, 0, "Date", &header_format)?;
        worksheet.write_string_with_format(0, 1, "Supplier", &header_format)?;
        worksheet.write_string_with_format(0, 2, "Median Minutes", &header_format)?;
        worksheet.write_string_with_format(0, 3, "Count", &header_format)?;

        let mut row = 1;
        for bucket in &data.rows {
            worksheet.write_string(row, 0, &bucket.date)?;
            worksheet.write_string(row, 1, &bucket.supplier_id)?;
            worksheet.write_number(row, 2, bucket.median_minutes)?;
            worksheet.write_number(row, 3, bucket.count as f64)?;
            row += 1;
        }

        row += 1;
        worksheet.write_string(row, 0, "Metric")?;
        worksheet.write_string(row, 1, &data.metric)?;
        row += 1;
        worksheet.write_string(row, 0, "Overall Median")?;
        worksheet.write_number(row, 1, data.overall_median_minutes)?;
        row += 1;
        worksheet.write_string(row, 0, "Overall Count")?;
        worksheet.write_number(row, 1, data.overall_count as f64)?;

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }

    fn export_bulk_excel(&self, data: &ExportBulkReport) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        worksheet.write_string_with_format(0, 0, "Organization", &header_format)?;
        worksheet.write_string_with_format(0, 1, "Date", &header_format)?;
        worksheet.write_string_with_format(0, 2, "Supplier", &header_format)?;
        worksheet.write_string_with_format(0, 3, "Median Minutes", &header_format)?;
        worksheet.write_string_with_format(0, 4, "Count", &header_format)?;

        let mut row = 1;
        for bucket in &data.rows {
            worksheet.write_string(row, 0, &bucket.organization_id)?;
            worksheet.write_string(row, 1, &bucket.date)?;
            worksheet.write_string(row, 2, &bucket.supplier_id)?;
            worksheet.write_number(row, 3, bucket.median_minutes)?;
            worksheet.write_number(row, 4, bucket.count as f64)?;
            row += 1;
        }

        row += 1;
        worksheet.write_string_with_format(row, 0, "ORGANIZATION OVERALL", &header_format)?;
        for overall in &data.overall_by_org {
            row += 1;
            worksheet.write_string(row, 0, &overall.organization_id)?;
            worksheet.write_number(row, 3, overall.median_minutes)?;
            worksheet.write_number(row, 4, overall.count as f64)?;
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }
}
