pub mod admin;
pub mod attendance;
pub mod front;
pub mod homework;

use crate::db::students::list_students;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Trimmed, non-empty form value.
fn field(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn student_names(conn: &Connection) -> AppResult<Vec<String>> {
    Ok(list_students(conn)?.into_iter().map(|s| s.name).collect())
}
