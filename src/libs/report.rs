//! Shared cycle time computation pipeline.
//!
//! The interactive `report` command and the batch `export` command both go
//! through the functions in this module: the same clipping and duration
//! algorithm feed the same aggregation. A single pipeline is a hard
//! consistency requirement, otherwise the numbers a supplier sees on screen
//! stop matching the numbers in the export file.

use crate::db::documents::DocumentRow;
use crate::libs::aggregate::{self, AggregateBucket, Overall, ValidRange};
use crate::libs::calendar::BusinessCalendar;
use crate::libs::config::Config;
use crate::libs::metrics::Metric;
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Grouping key for the per-day, per-supplier breakdown.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DailyKey {
    pub date: NaiveDate,
    pub supplier_id: String,
}

/// Grouping key for the bulk per-organization breakdown.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BulkKey {
    pub organization_id: String,
    pub date: NaiveDate,
    pub supplier_id: String,
}

/// Per-day, per-supplier buckets plus the ungrouped overall figure.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleTimeReport {
    pub metric: Metric,
    pub buckets: Vec<AggregateBucket<DailyKey>>,
    pub overall: Overall,
}

/// Bulk breakdown across organizations, one overall figure per organization.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkReport {
    pub metric: Metric,
    pub buckets: Vec<AggregateBucket<BulkKey>>,
    pub overall_by_org: Vec<(String, Overall)>,
}

/// One fully-specified computation: which metric, against which calendar,
/// with which validity range. Request-scoped and immutable.
#[derive(Debug, Clone, Copy)]
pub struct CycleTimeRequest {
    pub metric: Metric,
    pub calendar: BusinessCalendar,
    pub valid: ValidRange,
}

impl CycleTimeRequest {
    /// Builds a request from the effective configuration.
    pub fn from_config(metric: Metric, config: &Config) -> Result<Self> {
        Ok(CycleTimeRequest {
            metric,
            calendar: config.business_calendar()?,
            valid: config.valid_range(metric)?,
        })
    }

    fn daily_records(&self, rows: &[DocumentRow]) -> Vec<(DailyKey, i64)> {
        rows.iter()
            .filter_map(|row| {
                let minutes = self.metric.minutes(&self.calendar, row)?;
                let key = DailyKey {
                    date: row.created_at.date(),
                    supplier_id: row.supplier_id.clone(),
                };
                Some((key, minutes))
            })
            .collect()
    }

    fn bulk_records(&self, rows: &[DocumentRow]) -> Vec<(BulkKey, i64)> {
        rows.iter()
            .filter_map(|row| {
                let minutes = self.metric.minutes(&self.calendar, row)?;
                let key = BulkKey {
                    organization_id: row.organization_id.clone(),
                    date: row.created_at.date(),
                    supplier_id: row.supplier_id.clone(),
                };
                Some((key, minutes))
            })
            .collect()
    }

    /// Per-day, per-supplier aggregation plus the overall median.
    ///
    /// Empty row sets produce an empty bucket list and a zero overall, not
    /// an error: the caller still gets a well-formed report.
    pub fn build_daily(&self, rows: &[DocumentRow]) -> Result<CycleTimeReport> {
        let records = self.daily_records(rows);
        Ok(CycleTimeReport {
            metric: self.metric,
            buckets: aggregate::aggregate(&records, &self.valid)?,
            overall: aggregate::overall(&records, &self.valid)?,
        })
    }

    /// Bulk per-organization aggregation.
    ///
    /// Organizations are independent, so their buckets are computed in
    /// parallel batches and merged by key; the result is identical to a
    /// sequential pass.
    pub fn build_bulk(&self, rows: &[DocumentRow]) -> Result<BulkReport> {
        let records = self.bulk_records(rows);
        let buckets = aggregate::aggregate_partitioned(&records, &self.valid, |key| key.organization_id.clone())?;

        let mut by_org: BTreeMap<String, Vec<((), i64)>> = BTreeMap::new();
        for (key, minutes) in &records {
            by_org.entry(key.organization_id.clone()).or_default().push(((), *minutes));
        }
        let mut overall_by_org = Vec::new();
        for (organization_id, org_records) in by_org {
            overall_by_org.push((organization_id, aggregate::overall(&org_records, &self.valid)?));
        }

        Ok(BulkReport {
            metric: self.metric,
            buckets,
            overall_by_org,
        })
    }
}

/// Document counts per outcome, sorted by outcome name.
///
/// With `fine` grouping each stored outcome category is its own bucket; the
/// coarse grouping collapses all assigned-style outcomes into one `assigned`
/// bucket. Callers pick the granularity from
/// [`Documents::supports_outcome_breakdown`](crate::db::documents::Documents::supports_outcome_breakdown),
/// decided once per store rather than per query.
pub fn outcome_volume(rows: &[DocumentRow], fine: bool) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows {
        let outcome = match (&row.outcome_category, fine) {
            (Some(category), true) => category.clone(),
            _ if row.state.starts_with("assigned") => "assigned".to_string(),
            _ => row.state.clone(),
        };
        *counts.entry(outcome).or_default() += 1;
    }
    counts.into_iter().collect()
}
