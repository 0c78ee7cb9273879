//! Intake document storage and filtered row retrieval.
//!
//! This is the boundary between the metrics core and the storage layer: it
//! translates a [`DocumentFilter`] into the row set the duration calculator
//! and aggregator consume. Rows without the timestamps a metric needs are
//! excluded here or in the metric itself, never inside the aggregation.
//!
//! The `outcome_category` column arrived late in the schema's life, so older
//! stores may not have it. Instead of probing for it with a failing query,
//! [`Documents::supports_outcome_breakdown`] checks the schema once and
//! callers pick the fine or coarse outcome grouping from that flag.

use crate::db::db::Db;
use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, Row, ToSql};

const SCHEMA_DOCUMENTS: &str = "CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY,
    organization_id TEXT NOT NULL,
    supplier_id TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL,
    first_accessed_at TIMESTAMP,
    intake_updated_at TIMESTAMP,
    state TEXT NOT NULL DEFAULT 'new',
    outcome_category TEXT,
    ai_intake_enabled INTEGER NOT NULL DEFAULT 0
);";

const INSERT_DOCUMENT: &str = "INSERT INTO documents
    (organization_id, supplier_id, created_at, first_accessed_at, intake_updated_at, state, outcome_category, ai_intake_enabled)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT_DOCUMENTS: &str = "SELECT organization_id, supplier_id, created_at, first_accessed_at, intake_updated_at, state, outcome_category, ai_intake_enabled
    FROM documents
    WHERE created_at >= ? AND created_at < ? AND first_accessed_at IS NOT NULL";

// Legacy stores predate the outcome_category column.
const SELECT_DOCUMENTS_LEGACY: &str = "SELECT organization_id, supplier_id, created_at, first_accessed_at, intake_updated_at, state, NULL AS outcome_category, ai_intake_enabled
    FROM documents
    WHERE created_at >= ? AND created_at < ? AND first_accessed_at IS NOT NULL";

const PRAGMA_TABLE_INFO: &str = "PRAGMA table_info(documents)";

/// One intake document as the metrics core sees it.
#[derive(Debug, Clone)]
pub struct DocumentRow {
    pub organization_id: String,
    pub supplier_id: String,
    /// When the document was received.
    pub created_at: NaiveDateTime,
    /// When a person first opened it.
    pub first_accessed_at: Option<NaiveDateTime>,
    /// Last intake state change.
    pub intake_updated_at: Option<NaiveDateTime>,
    pub state: String,
    /// Fine-grained outcome, absent on stores predating the column.
    pub outcome_category: Option<String>,
    pub ai_intake_enabled: bool,
}

/// Filter specification for a row fetch.
///
/// Dates are inclusive on both ends; the query compares `created_at`
/// against `[start, end + 1 day)`.
#[derive(Debug, Clone)]
pub struct DocumentFilter {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub supplier_id: Option<String>,
    pub organization_id: Option<String>,
    pub ai_intake_only: bool,
}

impl DocumentFilter {
    /// Default reporting window: the 30 days ending on `today`.
    pub fn last_30_days(today: NaiveDate) -> Self {
        DocumentFilter {
            start_date: today - Duration::days(30),
            end_date: today,
            supplier_id: None,
            organization_id: None,
            ai_intake_only: false,
        }
    }
}

pub struct Documents {
    conn: Connection,
}

impl Documents {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_DOCUMENTS, [])?;
        Ok(Documents { conn: db.conn })
    }

    /// Wraps an existing connection. The schema is only created when the
    /// table is missing, so legacy stores keep their column set.
    pub fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA_DOCUMENTS, [])?;
        Ok(Documents { conn })
    }

    pub fn insert(&mut self, row: &DocumentRow) -> Result<()> {
        self.conn.execute(
            INSERT_DOCUMENT,
            rusqlite::params![
                row.organization_id,
                row.supplier_id,
                row.created_at,
                row.first_accessed_at,
                row.intake_updated_at,
                row.state,
                row.outcome_category,
                row.ai_intake_enabled,
            ],
        )?;
        Ok(())
    }

    /// Fetches the rows matching `filter`.
    ///
    /// Rows with no `first_accessed_at` are dropped here: every metric needs
    /// that endpoint and the core assumes both endpoints are present.
    pub fn fetch(&mut self, filter: &DocumentFilter) -> Result<Vec<DocumentRow>> {
        let start = filter.start_date.and_hms_opt(0, 0, 0).unwrap();
        let end = (filter.end_date + Duration::days(1)).and_hms_opt(0, 0, 0).unwrap();

        let mut sql = String::from(if self.supports_outcome_breakdown()? {
            SELECT_DOCUMENTS
        } else {
            SELECT_DOCUMENTS_LEGACY
        });
        let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(start), Box::new(end)];

        if let Some(supplier_id) = &filter.supplier_id {
            sql.push_str(" AND supplier_id = ?");
            params.push(Box::new(supplier_id.clone()));
        }
        if let Some(organization_id) = &filter.organization_id {
            sql.push_str(" AND organization_id = ?");
            params.push(Box::new(organization_id.clone()));
        }
        if filter.ai_intake_only {
            sql.push_str(" AND ai_intake_enabled = 1");
        }
        sql.push_str(" ORDER BY created_at");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), Self::map_row)?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(row?);
        }
        tracing::debug!(count = documents.len(), "fetched document rows");
        Ok(documents)
    }

    /// Whether this store carries the `outcome_category` column.
    ///
    /// Checked once against the schema so callers can choose the grouping
    /// granularity up front instead of discovering a missing column through
    /// a failed query.
    pub fn supports_outcome_breakdown(&self) -> Result<bool> {
        let mut stmt = self.conn.prepare(PRAGMA_TABLE_INFO)?;
        let columns = stmt.query_map([], |row| row.get::<_, String>(1))?;
        for column in columns {
            if column? == "outcome_category" {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<DocumentRow> {
        Ok(DocumentRow {
            organization_id: row.get(0)?,
            supplier_id: row.get(1)?,
            created_at: row.get(2)?,
            first_accessed_at: row.get(3)?,
            intake_updated_at: row.get(4)?,
            state: row.get(5)?,
            outcome_category: row.get(6)?,
            ai_intake_enabled: row.get(7)?,
        })
    }
}
