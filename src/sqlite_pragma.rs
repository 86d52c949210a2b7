//! Connection PRAGMAs shared by the fact reader and the ingestion writer

use rusqlite::Connection;
use std::time::Duration;

/// How long a reader waits on a lock held by an ingestion run
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Reader PRAGMAs: short busy timeout, and no writes through this connection
pub fn apply_read_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.pragma_update(None, "query_only", "ON")?;
    Ok(())
}

/// Writer PRAGMAs: WAL journal, enforced foreign keys
pub fn apply_write_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_pragmas_block_writes() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("pragma.db");

        let conn = Connection::open(&db_path).unwrap();
        conn.execute("CREATE TABLE t (x INTEGER)", []).unwrap();
        apply_read_pragmas(&conn).unwrap();

        assert!(conn.execute("INSERT INTO t (x) VALUES (1)", []).is_err());
    }

    #[test]
    fn test_write_pragmas_enable_foreign_keys() {
        let dir = tempdir().unwrap();
        let conn = Connection::open(dir.path().join("pragma.db")).unwrap();
        apply_write_pragmas(&conn).unwrap();

        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
