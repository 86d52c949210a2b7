//! SQLite-backed fact source
//!
//! Each `load()` opens its own read-only connection, reads both fact
//! collections, and drops the connection before returning. Nothing is cached
//! between calls.
//!
//! Cells are decoded leniently: a value of the wrong storage class (a date
//! stored as an integer, an amount of `'N/A'`) loads as a missing field, so
//! one malformed row never hides the rest of the store.

use super::{FactSource, StoreError};
use crate::signals_core::facts::{parse_fact_date, BillStatusEvent, FactSet, TradeDisclosure};
use crate::sqlite_pragma::apply_read_pragmas;
use chrono::NaiveDate;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};

const TRADES_SQL: &str = "
    SELECT t.id, o.full_name, c.ticker, c.sector,
           t.trade_date, t.transaction_type, t.amount_low, t.amount_high
    FROM trade_disclosure t
    JOIN official o ON o.id = t.official_id
    JOIN company c ON c.id = t.company_id
    ORDER BY t.id ASC";

const STATUS_EVENTS_SQL: &str = "
    SELECT bs.id, b.external_bill_id, b.title, b.sector, bs.status, bs.status_date
    FROM bill_status bs
    JOIN bill b ON b.id = bs.bill_id
    ORDER BY bs.id ASC";

pub struct SqliteFactSource {
    db_path: PathBuf,
}

impl SqliteFactSource {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open read-only; a missing file is reported, never created
    fn open(&self) -> Result<Connection, StoreError> {
        if !self.db_path.exists() {
            return Err(StoreError::Unavailable(self.db_path.clone()));
        }

        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(StoreError::Open)?;
        apply_read_pragmas(&conn).map_err(StoreError::Open)?;

        Ok(conn)
    }
}

/// Text cell, or the display form of a numeric cell; NULL and BLOB read as missing
fn text_cell(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    })
}

/// Only ISO text dates count; any other storage class is a missing date
fn date_cell(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_fact_date),
        _ => None,
    })
}

/// Numeric cell, or numeric text such as `"1001"`; anything else ('N/A', blobs) is missing
fn amount_cell(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<f64>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(value) => Some(value as f64),
        ValueRef::Real(value) => Some(value),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    })
}

fn trade_from_row(row: &Row<'_>) -> rusqlite::Result<TradeDisclosure> {
    Ok(TradeDisclosure {
        id: row.get(0)?,
        official: text_cell(row, 1)?.unwrap_or_default(),
        ticker: text_cell(row, 2)?.unwrap_or_default(),
        company_sector: text_cell(row, 3)?,
        trade_date: date_cell(row, 4)?,
        transaction_type: text_cell(row, 5)?.unwrap_or_default(),
        amount_low: amount_cell(row, 6)?,
        amount_high: amount_cell(row, 7)?,
    })
}

fn status_event_from_row(row: &Row<'_>) -> rusqlite::Result<BillStatusEvent> {
    Ok(BillStatusEvent {
        id: row.get(0)?,
        external_bill_id: text_cell(row, 1)?.unwrap_or_default(),
        bill_title: text_cell(row, 2)?,
        bill_sector: text_cell(row, 3)?,
        status: text_cell(row, 4)?,
        status_date: date_cell(row, 5)?,
    })
}

fn load_trades(conn: &Connection) -> rusqlite::Result<Vec<TradeDisclosure>> {
    let mut stmt = conn.prepare(TRADES_SQL)?;
    let rows = stmt.query_map([], trade_from_row)?;
    rows.collect()
}

fn load_status_events(conn: &Connection) -> rusqlite::Result<Vec<BillStatusEvent>> {
    let mut stmt = conn.prepare(STATUS_EVENTS_SQL)?;
    let rows = stmt.query_map([], status_event_from_row)?;
    rows.collect()
}

impl FactSource for SqliteFactSource {
    fn load(&self) -> Result<FactSet, StoreError> {
        let conn = self.open()?;

        let trades = load_trades(&conn)?;
        let status_events = load_status_events(&conn)?;

        log::debug!(
            "📥 Loaded {} trades and {} status events from {}",
            trades.len(),
            status_events.len(),
            self.db_path.display()
        );

        Ok(FactSet::new(trades, status_events))
    }

    fn describe(&self) -> String {
        self.db_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::apply_schema;
    use rusqlite::params;
    use tempfile::tempdir;

    fn setup_test_db() -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let conn = Connection::open(&db_path).unwrap();
        apply_schema(&conn).unwrap();

        conn.execute("INSERT INTO official (id, full_name) VALUES (1, 'Jane Doe')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO company (id, ticker, name, sector)
             VALUES (1, 'NVDA', 'NVIDIA', 'Technology')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO bill (id, external_bill_id, title, sector)
             VALUES (1, 'HR-1', 'AI Act', 'Technology')",
            [],
        )
        .unwrap();

        (dir, db_path)
    }

    fn insert_trade(conn: &Connection, trade_date: Option<&str>, tx: &str) {
        conn.execute(
            "INSERT INTO trade_disclosure
                 (official_id, company_id, trade_date, transaction_type, amount_low, amount_high)
             VALUES (1, 1, ?1, ?2, 1001.0, 15000.0)",
            params![trade_date, tx],
        )
        .unwrap();
    }

    #[test]
    fn test_load_denormalized_facts() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_trade(&conn, Some("2024-01-10"), "Purchase");
        conn.execute(
            "INSERT INTO bill_status (bill_id, status, status_date)
             VALUES (1, 'Introduced', '2024-01-12')",
            [],
        )
        .unwrap();
        drop(conn);

        let facts = SqliteFactSource::new(&db_path).load().unwrap();

        assert_eq!(facts.trades.len(), 1);
        assert_eq!(facts.trades[0].official, "Jane Doe");
        assert_eq!(facts.trades[0].ticker, "NVDA");
        assert_eq!(facts.trades[0].company_sector.as_deref(), Some("Technology"));
        assert_eq!(facts.trades[0].amount_high, Some(15000.0));
        assert_eq!(facts.status_events.len(), 1);
        assert_eq!(facts.status_events[0].external_bill_id, "HR-1");
        assert_eq!(facts.status_events[0].bill_title.as_deref(), Some("AI Act"));
    }

    #[test]
    fn test_bad_dates_load_as_missing() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_trade(&conn, None, "Purchase");
        insert_trade(&conn, Some("last tuesday"), "Sale");
        drop(conn);

        let facts = SqliteFactSource::new(&db_path).load().unwrap();

        assert_eq!(facts.trades.len(), 2);
        assert!(facts.trades.iter().all(|t| t.trade_date.is_none()));
    }

    #[test]
    fn test_mistyped_cells_load_as_missing() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_trade(&conn, Some("2024-01-10"), "Purchase");
        conn.execute(
            "INSERT INTO trade_disclosure
                 (official_id, company_id, trade_date, transaction_type, amount_low, amount_high)
             VALUES (1, 1, 20240110, 'Sale', 'N/A', '15000')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO bill_status (bill_id, status, status_date)
             VALUES (1, 'Introduced', 20240112)",
            [],
        )
        .unwrap();
        drop(conn);

        let facts = SqliteFactSource::new(&db_path).load().unwrap();

        assert_eq!(facts.trades.len(), 2);
        assert!(facts.trades[0].trade_date.is_some());
        assert_eq!(facts.trades[0].amount_low, Some(1001.0));

        let mistyped = &facts.trades[1];
        assert_eq!(mistyped.trade_date, None);
        assert_eq!(mistyped.amount_low, None);
        assert_eq!(mistyped.amount_high, Some(15000.0));
        assert_eq!(mistyped.transaction_type, "Sale");

        assert_eq!(facts.status_events.len(), 1);
        assert_eq!(facts.status_events[0].status_date, None);
    }

    #[test]
    fn test_missing_file_unavailable() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("absent.db");

        let err = SqliteFactSource::new(&db_path).load().unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(err.is_unavailable());
        assert!(!db_path.exists(), "reader must not create the store");
    }

    #[test]
    fn test_missing_tables_is_query_failure() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("bare.db");
        Connection::open(&db_path)
            .unwrap()
            .execute("CREATE TABLE unrelated (x INTEGER)", [])
            .unwrap();

        let err = SqliteFactSource::new(&db_path).load().unwrap_err();

        assert!(matches!(err, StoreError::Query(_)));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_each_load_sees_new_rows() {
        let (_dir, db_path) = setup_test_db();
        let source = SqliteFactSource::new(&db_path);

        assert!(source.load().unwrap().trades.is_empty());

        let conn = Connection::open(&db_path).unwrap();
        insert_trade(&conn, Some("2024-01-10"), "Purchase");
        drop(conn);

        assert_eq!(source.load().unwrap().trades.len(), 1);
    }
}
