use rusqlite::{Connection, OptionalExtension, Result};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: u64,
    pub deck_name: String,
    pub started_at: u64,
    pub completed_at: Option<u64>,
    pub pool_size: usize,
    pub correct_count: usize,
    pub total_count: usize,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn create_session(conn: &Connection, deck_name: &str, pool_size: usize) -> Result<u64> {
    conn.execute(
        "INSERT INTO sessions (deck_name, started_at, pool_size, correct_count, total_count)
         VALUES (?, ?, ?, 0, 0)",
        rusqlite::params![deck_name, now(), pool_size],
    )?;

    Ok(conn.last_insert_rowid() as u64)
}

/// Stores the final counters and marks the session completed.
pub fn record_result(
    conn: &Connection,
    session_id: u64,
    correct_count: usize,
    total_count: usize,
) -> Result<()> {
    conn.execute(
        "UPDATE sessions SET completed_at = ?, correct_count = ?, total_count = ? WHERE id = ?",
        rusqlite::params![now(), correct_count, total_count, session_id],
    )?;
    Ok(())
}

fn summary_from_row(row: &rusqlite::Row<'_>) -> Result<SessionSummary> {
    Ok(SessionSummary {
        id: row.get(0)?,
        deck_name: row.get(1)?,
        started_at: row.get(2)?,
        completed_at: row.get(3)?,
        pool_size: row.get(4)?,
        correct_count: row.get(5)?,
        total_count: row.get(6)?,
    })
}

pub fn get_session(conn: &Connection, id: u64) -> Result<Option<SessionSummary>> {
    conn.query_row(
        "SELECT id, deck_name, started_at, completed_at, pool_size, correct_count, total_count
         FROM sessions WHERE id = ?",
        [id],
        summary_from_row,
    )
    .optional()
}

/// Most recent sessions first.
pub fn list_recent_sessions(conn: &Connection, limit: usize) -> Result<Vec<SessionSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, deck_name, started_at, completed_at, pool_size, correct_count, total_count
         FROM sessions ORDER BY started_at DESC, id DESC LIMIT ?",
    )?;

    let sessions = stmt
        .query_map([limit], summary_from_row)?
        .filter_map(|r| r.ok())
        .collect();

    Ok(sessions)
}
