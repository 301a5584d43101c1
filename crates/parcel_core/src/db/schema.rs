//! Parcel table definition.

use super::DbResult;
use rusqlite::Connection;

/// Name of the single table backing the parcel store.
pub const PARCEL_TABLE: &str = "parcel";

/// Columns every reader and writer of `parcel` relies on.
pub const PARCEL_COLUMNS: &[&str] = &["number", "client", "status", "address", "created_at"];

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the `parcel` table and its client index if missing.
///
/// Safe to call on every open; existing rows are never touched.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
