use crate::libs::formatter::format_median;
use crate::libs::messages::Message;
use crate::libs::report::{BulkReport, CycleTimeReport};
use crate::msg_print;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn daily(report: &CycleTimeReport) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "SUPPLIER", "MEDIAN (MIN)", "MEDIAN (HH:MM)", "COUNT"]);
        for bucket in &report.buckets {
            table.add_row(row![
                bucket.key.date,
                bucket.key.supplier_id,
                format!("{:.2}", bucket.median_minutes),
                format_median(bucket.median_minutes),
                bucket.count
            ]);
        }
        table.printstd();

        msg_print!(Message::OverallSummary(report.overall.median_minutes, report.overall.count));
        Ok(())
    }

    pub fn bulk(report: &BulkReport) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ORGANIZATION", "DATE", "SUPPLIER", "MEDIAN (MIN)", "COUNT"]);
        for bucket in &report.buckets {
            table.add_row(row![
                bucket.key.organization_id,
                bucket.key.date,
                bucket.key.supplier_id,
                format!("{:.2}", bucket.median_minutes),
                bucket.count
            ]);
        }
        table.printstd();

        let mut overall = Table::new();
        overall.add_row(row!["ORGANIZATION", "OVERALL MEDIAN (MIN)", "COUNT"]);
        for (organization_id, stats) in &report.overall_by_org {
            overall.add_row(row![organization_id, format!("{:.2}", stats.median_minutes), stats.count]);
        }
        overall.printstd();
        Ok(())
    }

    pub fn outcomes(counts: &[(String, usize)]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["OUTCOME", "DOCUMENTS"]);
        for (outcome, count) in counts {
            table.add_row(row![outcome, count]);
        }
        table.printstd();
        Ok(())
    }
}
