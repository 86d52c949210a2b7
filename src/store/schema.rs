//! Fact store schema

use rusqlite::Connection;

/// Idempotent schema (every statement uses IF NOT EXISTS)
pub const SCHEMA_SQL: &str = include_str!("../../sql/01_schema.sql");

pub fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    log::info!("✅ Fact store schema applied");
    Ok(())
}
