//! Student rows. Removing a student also removes its attendance rows.

use crate::db::map_unique;
use crate::errors::{AppError, AppResult};
use crate::models::student::Student;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_student(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

pub fn insert_student(conn: &Connection, name: &str) -> AppResult<Student> {
    conn.execute("INSERT INTO students (name) VALUES (?1)", [name])
        .map_err(|e| map_unique(e, "student", name.to_string()))?;

    Ok(Student {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub fn find_student_by_id(conn: &Connection, id: i64) -> AppResult<Student> {
    conn.query_row("SELECT id, name FROM students WHERE id = ?1", [id], map_student)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Student #{} not found", id)))
}

pub fn find_student_by_name(conn: &Connection, name: &str) -> AppResult<Option<Student>> {
    let s = conn
        .query_row(
            "SELECT id, name FROM students WHERE name = ?1",
            [name],
            map_student,
        )
        .optional()?;
    Ok(s)
}

/// All students in insertion order.
pub fn list_students(conn: &Connection) -> AppResult<Vec<Student>> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM students ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_student)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn rename_student(conn: &Connection, id: i64, name: &str) -> AppResult<()> {
    let n = conn
        .execute("UPDATE students SET name = ?1 WHERE id = ?2", params![name, id])
        .map_err(|e| map_unique(e, "student", name.to_string()))?;
    if n == 0 {
        return Err(AppError::NotFound(format!("Student #{} not found", id)));
    }
    Ok(())
}

/// Delete a student and its attendance rows in one transaction.
/// Homework progress and doubts are left untouched.
/// Returns the number of attendance rows removed.
pub fn delete_student(conn: &Connection, id: i64) -> AppResult<usize> {
    let tx = conn.unchecked_transaction()?;
    let removed = tx.execute("DELETE FROM attendance WHERE student_id = ?1", [id])?;
    let n = tx.execute("DELETE FROM students WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::NotFound(format!("Student #{} not found", id)));
    }
    tx.commit()?;
    Ok(removed)
}

/// Insert every roster name not yet present. Returns how many were added.
pub fn seed_students(conn: &Connection, roster: &[String]) -> AppResult<usize> {
    let mut added = 0;
    for name in roster {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        added += conn.execute(
            "INSERT INTO students (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            [name],
        )?;
    }
    Ok(added)
}
