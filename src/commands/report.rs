//! Interactive cycle time report command.
//!
//! Fetches the filtered document rows, runs them through the shared
//! computation pipeline and renders the buckets as terminal tables. The
//! batch `export` command uses the identical pipeline; only the presentation
//! differs.

use crate::db::documents::{DocumentFilter, Documents};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::metrics::Metric;
use crate::libs::report::{outcome_volume, CycleTimeRequest};
use crate::libs::view::View;
use crate::{msg_error_anyhow, msg_info, msg_print, msg_warning};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;

/// Row filter options shared by the report and export commands.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Start date (YYYY-MM-DD, defaults to 30 days ago)
    #[arg(long)]
    pub start_date: Option<String>,

    /// End date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Filter by a specific supplier
    #[arg(long)]
    pub supplier: Option<String>,

    /// Filter by a supplier organization
    #[arg(long)]
    pub organization: Option<String>,

    /// Only include AI-intake-enabled documents
    #[arg(long)]
    pub ai_intake_only: bool,
}

impl FilterArgs {
    /// Resolves the CLI options into a concrete filter.
    ///
    /// Missing dates fall back to the last-30-days window ending today.
    pub fn to_filter(&self, today: NaiveDate) -> Result<DocumentFilter> {
        let mut filter = DocumentFilter::last_30_days(today);
        if let Some(value) = &self.end_date {
            filter.end_date = parse_date(value)?;
            filter.start_date = filter.end_date - Duration::days(30);
        }
        if let Some(value) = &self.start_date {
            filter.start_date = parse_date(value)?;
        }
        if filter.start_date > filter.end_date {
            return Err(msg_error_anyhow!(Message::InvalidDateRange(
                filter.start_date.to_string(),
                filter.end_date.to_string()
            )));
        }

        filter.supplier_id = self.supplier.clone();
        filter.organization_id = self.organization.clone();
        filter.ai_intake_only = self.ai_intake_only;
        Ok(filter)
    }
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Metric to report
    #[arg(short, long, value_enum, default_value = "received-to-open")]
    metric: Metric,

    #[command(flatten)]
    filter: FilterArgs,

    /// Break the report down by supplier organization
    #[arg(long)]
    bulk: bool,

    /// Also show document counts per outcome
    #[arg(long)]
    outcomes: bool,
}

pub fn cmd(args: ReportArgs) -> Result<()> {
    let config = Config::read()?;
    let filter = args.filter.to_filter(Local::now().date_naive())?;

    let mut documents = Documents::new()?;
    let rows = documents.fetch(&filter)?;
    if rows.is_empty() {
        msg_info!(Message::NoDocumentsFound);
    }

    let request = CycleTimeRequest::from_config(args.metric, &config)?;

    msg_print!(
        Message::ReportHeader(
            args.metric.label().to_string(),
            filter.start_date.to_string(),
            filter.end_date.to_string()
        ),
        true
    );
    if args.bulk {
        View::bulk(&request.build_bulk(&rows)?)?;
    } else {
        View::daily(&request.build_daily(&rows)?)?;
    }

    if args.outcomes {
        let fine = documents.supports_outcome_breakdown()?;
        if !fine {
            msg_warning!(Message::OutcomeBreakdownUnavailable);
        }
        View::outcomes(&outcome_volume(&rows, fine))?;
    }

    Ok(())
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDate(value.to_string())))
}
