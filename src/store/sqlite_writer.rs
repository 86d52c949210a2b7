//! Ingestion-side writer with get-or-create on natural keys
//!
//! Officials are keyed by name, companies by ticker, bills by external id.
//! An existing row is never updated. Status events and trades are appended.

use super::StoreError;
use crate::sqlite_pragma::apply_write_pragmas;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewCompany {
    pub ticker: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewBill {
    pub external_bill_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewBillStatus {
    pub external_bill_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewTrade {
    #[serde(alias = "senator")]
    pub official: String,
    pub ticker: String,
    #[serde(default)]
    pub trade_date: Option<String>,
    pub transaction_type: String,
    #[serde(default)]
    pub amount_low: Option<f64>,
    #[serde(default)]
    pub amount_high: Option<f64>,
}

/// Blank strings are stored as NULL
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

const BILL_BY_EXTERNAL_ID_SQL: &str = "SELECT id FROM bill WHERE external_bill_id = ?1";

fn find_id(conn: &Connection, sql: &str, key: &str) -> rusqlite::Result<Option<i64>> {
    conn.query_row(sql, [key], |row| row.get(0)).optional()
}

pub(crate) fn get_or_create_official(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
    let name = name.trim();
    if let Some(id) = find_id(conn, "SELECT id FROM official WHERE full_name = ?1", name)? {
        return Ok(id);
    }
    conn.execute("INSERT INTO official (full_name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn get_or_create_company(
    conn: &Connection,
    company: &NewCompany,
) -> rusqlite::Result<i64> {
    let ticker = company.ticker.trim();
    if let Some(id) = find_id(conn, "SELECT id FROM company WHERE ticker = ?1", ticker)? {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO company (ticker, name, sector, industry) VALUES (?1, ?2, ?3, ?4)",
        params![
            ticker,
            non_blank(company.name.as_deref()),
            non_blank(company.sector.as_deref()),
            non_blank(company.industry.as_deref()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn get_or_create_bill(conn: &Connection, bill: &NewBill) -> rusqlite::Result<i64> {
    let external_id = bill.external_bill_id.trim();
    if let Some(id) = find_id(conn, BILL_BY_EXTERNAL_ID_SQL, external_id)? {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO bill (external_bill_id, title, sector) VALUES (?1, ?2, ?3)",
        params![
            external_id,
            non_blank(bill.title.as_deref()),
            non_blank(bill.sector.as_deref()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns false (and warns) when the referenced bill does not exist
pub(crate) fn add_status_event(conn: &Connection, event: &NewBillStatus) -> rusqlite::Result<bool> {
    let external_id = event.external_bill_id.trim();
    let Some(bill_id) = find_id(conn, BILL_BY_EXTERNAL_ID_SQL, external_id)? else {
        log::warn!("⚠️  Status references unknown bill {}, skipping", external_id);
        return Ok(false);
    };
    conn.execute(
        "INSERT INTO bill_status (bill_id, status, status_date) VALUES (?1, ?2, ?3)",
        params![
            bill_id,
            non_blank(event.status.as_deref()),
            non_blank(event.status_date.as_deref()),
        ],
    )?;
    Ok(true)
}

pub(crate) fn add_trade(conn: &Connection, trade: &NewTrade) -> rusqlite::Result<i64> {
    let official_id = get_or_create_official(conn, &trade.official)?;
    let company_id = get_or_create_company(
        conn,
        &NewCompany {
            ticker: trade.ticker.clone(),
            ..NewCompany::default()
        },
    )?;
    conn.execute(
        "INSERT INTO trade_disclosure (
            official_id, company_id, trade_date,
            transaction_type, amount_low, amount_high
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            official_id,
            company_id,
            non_blank(trade.trade_date.as_deref()),
            trade.transaction_type.trim(),
            trade.amount_low,
            trade.amount_high,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Read-write handle used by the ingestion side
pub struct FactWriter {
    pub(crate) conn: Connection,
}

impl FactWriter {
    /// Open (creating if needed) the store for writing
    ///
    /// Does NOT create the schema; call [`super::apply_schema`] first on a new file.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(db_path).map_err(StoreError::Open)?;
        apply_write_pragmas(&conn).map_err(StoreError::Open)?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn official(&self, name: &str) -> Result<i64, StoreError> {
        Ok(get_or_create_official(&self.conn, name)?)
    }

    pub fn company(&self, company: &NewCompany) -> Result<i64, StoreError> {
        Ok(get_or_create_company(&self.conn, company)?)
    }

    pub fn bill(&self, bill: &NewBill) -> Result<i64, StoreError> {
        Ok(get_or_create_bill(&self.conn, bill)?)
    }

    pub fn status_event(&self, event: &NewBillStatus) -> Result<bool, StoreError> {
        Ok(add_status_event(&self.conn, event)?)
    }

    pub fn trade(&self, trade: &NewTrade) -> Result<i64, StoreError> {
        Ok(add_trade(&self.conn, trade)?)
    }
}
