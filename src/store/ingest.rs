//! Bulk ingestion of a JSON fact document
//!
//! Document shape (every section optional):
//!
//! ```json
//! {
//!   "companies":     [{"ticker": "NVDA", "name": "NVIDIA", "sector": "Technology"}],
//!   "bills":         [{"external_bill_id": "HR-1", "title": "...", "sector": "Technology"}],
//!   "bill_statuses": [{"external_bill_id": "HR-1", "status": "Introduced",
//!                      "status_date": "2024-01-12"}],
//!   "trades":        [{"official": "Jane Doe", "ticker": "NVDA", "trade_date": "2024-01-10",
//!                      "transaction_type": "Purchase", "amount_low": 1001, "amount_high": 15000}]
//! }
//! ```
//!
//! Sections load in the order above inside a single transaction.

use super::sqlite_writer::{
    add_status_event, add_trade, get_or_create_bill, get_or_create_company, FactWriter, NewBill,
    NewBillStatus, NewCompany, NewTrade,
};
use super::StoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestDocument {
    #[serde(default)]
    pub companies: Vec<NewCompany>,
    #[serde(default)]
    pub bills: Vec<NewBill>,
    #[serde(default)]
    pub bill_statuses: Vec<NewBillStatus>,
    #[serde(default)]
    pub trades: Vec<NewTrade>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub companies: usize,
    pub bills: usize,
    pub bill_statuses: usize,
    pub skipped_statuses: usize,
    pub trades: usize,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed fact document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn ingest_document(
    writer: &mut FactWriter,
    doc: &IngestDocument,
) -> Result<IngestReport, StoreError> {
    let tx = writer.conn.transaction()?;
    let mut report = IngestReport::default();

    for company in &doc.companies {
        get_or_create_company(&tx, company)?;
        report.companies += 1;
    }
    log::info!("Loaded {} companies", report.companies);

    for bill in &doc.bills {
        get_or_create_bill(&tx, bill)?;
        report.bills += 1;
    }
    log::info!("Loaded {} bills", report.bills);

    for status in &doc.bill_statuses {
        if add_status_event(&tx, status)? {
            report.bill_statuses += 1;
        } else {
            report.skipped_statuses += 1;
        }
    }
    log::info!(
        "Loaded {} bill statuses ({} skipped)",
        report.bill_statuses,
        report.skipped_statuses
    );

    for trade in &doc.trades {
        add_trade(&tx, trade)?;
        report.trades += 1;
    }
    log::info!("Loaded {} trades", report.trades);

    tx.commit()?;
    Ok(report)
}

pub fn ingest_file(
    writer: &mut FactWriter,
    path: impl AsRef<Path>,
) -> Result<IngestReport, IngestError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let doc: IngestDocument = serde_json::from_str(&raw)?;
    Ok(ingest_document(writer, &doc)?)
}
