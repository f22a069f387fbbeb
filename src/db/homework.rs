//! Homework, per-student progress and doubts.
//! None of these rows are ever deleted.

use crate::errors::{AppError, AppResult};
use crate::models::homework::{Homework, HomeworkDoubt, HomeworkProgress};
use crate::utils::date::{from_db, to_db};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

// ---------------------------
// Homework
// ---------------------------

const SELECT_HOMEWORK: &str = "SELECT id, date, course, description FROM homework";

fn map_homework(row: &Row) -> rusqlite::Result<Homework> {
    let date_str: String = row.get("date")?;
    Ok(Homework {
        id: row.get("id")?,
        date: from_db(&date_str)?,
        course: row.get("course")?,
        description: row.get("description")?,
    })
}

#[derive(Debug, Clone, Default)]
pub struct HomeworkFilter {
    pub course: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Insert a homework for (date, course) or overwrite only its description.
pub fn upsert_homework(
    conn: &Connection,
    date: &NaiveDate,
    course: &str,
    description: &str,
) -> AppResult<Homework> {
    conn.execute(
        "INSERT INTO homework (date, course, description)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(date, course) DO UPDATE SET description = excluded.description",
        params![to_db(date), course, description],
    )?;

    find_homework(conn, date, course)?.ok_or_else(|| {
        AppError::Other(format!(
            "homework vanished after upsert ({}, {})",
            to_db(date),
            course
        ))
    })
}

pub fn find_homework_by_id(conn: &Connection, id: i64) -> AppResult<Homework> {
    let sql = format!("{SELECT_HOMEWORK} WHERE id = ?1");
    conn.query_row(&sql, [id], map_homework)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Homework #{} not found", id)))
}

pub fn find_homework(
    conn: &Connection,
    date: &NaiveDate,
    course: &str,
) -> AppResult<Option<Homework>> {
    let sql = format!("{SELECT_HOMEWORK} WHERE date = ?1 AND course = ?2");
    let hw = conn
        .query_row(&sql, params![to_db(date), course], map_homework)
        .optional()?;
    Ok(hw)
}

/// Homework matching `filter`, newest date first.
pub fn list_homework(conn: &Connection, filter: &HomeworkFilter) -> AppResult<Vec<Homework>> {
    let mut conditions = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(d) = &filter.from {
        conditions.push("date >= ?");
        values.push(Value::Text(to_db(d)));
    }
    if let Some(d) = &filter.to {
        conditions.push("date <= ?");
        values.push(Value::Text(to_db(d)));
    }
    if let Some(c) = &filter.course {
        conditions.push("course = ?");
        values.push(Value::Text(c.clone()));
    }

    let mut sql = SELECT_HOMEWORK.to_string();
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY date DESC, id ASC");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_homework)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_homework(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM homework", [], |r| r.get(0))?;
    Ok(n)
}

// ---------------------------
// Progress
// ---------------------------

fn map_progress(row: &Row) -> rusqlite::Result<HomeworkProgress> {
    Ok(HomeworkProgress {
        id: row.get("id")?,
        homework_id: row.get("homework_id")?,
        student_id: row.get("student_id")?,
        marks: row.get("marks")?,
        progress: row.get("progress")?,
    })
}

/// Insert or overwrite the marks/progress of one student for one homework.
pub fn upsert_progress(
    conn: &Connection,
    homework_id: i64,
    student_id: i64,
    marks: &str,
    progress: &str,
) -> AppResult<HomeworkProgress> {
    conn.execute(
        "INSERT INTO homework_progress (homework_id, student_id, marks, progress)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(homework_id, student_id)
         DO UPDATE SET marks = excluded.marks, progress = excluded.progress",
        params![homework_id, student_id, marks, progress],
    )?;

    find_progress(conn, homework_id, student_id)?.ok_or_else(|| {
        AppError::Other(format!(
            "progress vanished after upsert ({}, {})",
            homework_id, student_id
        ))
    })
}

pub fn find_progress(
    conn: &Connection,
    homework_id: i64,
    student_id: i64,
) -> AppResult<Option<HomeworkProgress>> {
    let p = conn
        .query_row(
            "SELECT id, homework_id, student_id, marks, progress
             FROM homework_progress
             WHERE homework_id = ?1 AND student_id = ?2",
            params![homework_id, student_id],
            map_progress,
        )
        .optional()?;
    Ok(p)
}

pub fn list_progress_for_homework(
    conn: &Connection,
    homework_id: i64,
) -> AppResult<Vec<HomeworkProgress>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, homework_id, student_id, marks, progress
         FROM homework_progress
         WHERE homework_id = ?1
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([homework_id], map_progress)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Doubts
// ---------------------------

const SELECT_DOUBT: &str = "SELECT id, homework_id, student_id, question, answer, created_at, answered_at
     FROM homework_doubts";

fn map_doubt(row: &Row) -> rusqlite::Result<HomeworkDoubt> {
    Ok(HomeworkDoubt {
        id: row.get("id")?,
        homework_id: row.get("homework_id")?,
        student_id: row.get("student_id")?,
        question: row.get("question")?,
        answer: row.get("answer")?,
        created_at: row.get("created_at")?,
        answered_at: row.get("answered_at")?,
    })
}

pub fn insert_doubt(
    conn: &Connection,
    homework_id: i64,
    student_id: i64,
    question: &str,
    created_at: &str,
) -> AppResult<HomeworkDoubt> {
    conn.execute(
        "INSERT INTO homework_doubts (homework_id, student_id, question, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![homework_id, student_id, question, created_at],
    )?;
    find_doubt_by_id(conn, conn.last_insert_rowid())
}

pub fn find_doubt_by_id(conn: &Connection, id: i64) -> AppResult<HomeworkDoubt> {
    let sql = format!("{SELECT_DOUBT} WHERE id = ?1");
    conn.query_row(&sql, [id], map_doubt)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Doubt #{} not found", id)))
}

/// Doubts one student raised on one homework, oldest first.
pub fn list_doubts(
    conn: &Connection,
    homework_id: i64,
    student_id: i64,
) -> AppResult<Vec<HomeworkDoubt>> {
    let sql = format!("{SELECT_DOUBT} WHERE homework_id = ?1 AND student_id = ?2 ORDER BY id ASC");
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params![homework_id, student_id], map_doubt)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every doubt still waiting for an answer, newest first.
pub fn list_unanswered_doubts(conn: &Connection) -> AppResult<Vec<HomeworkDoubt>> {
    let sql = format!("{SELECT_DOUBT} WHERE answer IS NULL ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], map_doubt)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Set answer and answered_at. Overwrites a previous answer.
pub fn update_doubt_answer(
    conn: &Connection,
    id: i64,
    answer: &str,
    answered_at: &str,
) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE homework_doubts SET answer = ?1, answered_at = ?2 WHERE id = ?3",
        params![answer, answered_at, id],
    )?;
    if n == 0 {
        return Err(AppError::NotFound(format!("Doubt #{} not found", id)));
    }
    Ok(())
}
