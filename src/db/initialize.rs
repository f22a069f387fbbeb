use crate::db::migrate::run_pending_migrations;
use crate::db::students::seed_students;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation to the migration engine, then seeds the
/// roster. Safe to call on every open: both steps are idempotent.
pub fn init_db(conn: &Connection, roster: &[String]) -> AppResult<usize> {
    run_pending_migrations(conn)?;
    seed_students(conn, roster)
}
