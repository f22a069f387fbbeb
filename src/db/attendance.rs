//! Attendance rows, keyed by (student_id, date, course).

use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceMark, AttendanceRecord};
use crate::models::status::Status;
use crate::utils::date::{from_db, to_db};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

const SELECT_ATTENDANCE: &str =
    "SELECT id, student_id, date, course, status, info FROM attendance";

pub fn map_attendance(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;
    let status_str: String = row.get("status")?;

    let status = Status::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        date: from_db(&date_str)?,
        course: row.get("course")?,
        status,
        info: row.get("info")?,
    })
}

/// Equality/range filter over attendance rows. `None` fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub student_id: Option<i64>,
    pub course: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl AttendanceFilter {
    pub fn for_student(student_id: i64) -> Self {
        Self {
            student_id: Some(student_id),
            ..Default::default()
        }
    }

    pub fn on(date: NaiveDate) -> Self {
        Self {
            from: Some(date),
            to: Some(date),
            ..Default::default()
        }
    }

    pub fn course(mut self, course: Option<&str>) -> Self {
        self.course = course.map(str::to_string);
        self
    }

    pub fn between(mut self, bounds: Option<(NaiveDate, NaiveDate)>) -> Self {
        if let Some((from, to)) = bounds {
            self.from = Some(from);
            self.to = Some(to);
        }
        self
    }

    fn to_sql(&self) -> (String, Vec<Value>) {
        let mut conditions = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(id) = self.student_id {
            conditions.push("student_id = ?");
            values.push(Value::Integer(id));
        }
        if let Some(c) = &self.course {
            conditions.push("course = ?");
            values.push(Value::Text(c.clone()));
        }
        if let Some(d) = &self.from {
            conditions.push("date >= ?");
            values.push(Value::Text(to_db(d)));
        }
        if let Some(d) = &self.to {
            conditions.push("date <= ?");
            values.push(Value::Text(to_db(d)));
        }

        let mut sql = SELECT_ATTENDANCE.to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        (sql, values)
    }
}

/// Insert the mark, or overwrite status/info of the existing row with the
/// same (student, date, course). Returns the stored row.
pub fn upsert_attendance(conn: &Connection, mark: &AttendanceMark) -> AppResult<AttendanceRecord> {
    let date = to_db(&mark.date);
    conn.execute(
        "INSERT INTO attendance (student_id, date, course, status, info)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(student_id, date, course)
         DO UPDATE SET status = excluded.status, info = excluded.info",
        params![
            mark.student_id,
            date,
            mark.course,
            mark.status.to_db_str(),
            mark.info
        ],
    )?;

    find_attendance(conn, mark.student_id, &mark.date, &mark.course)?.ok_or_else(|| {
        AppError::Other(format!(
            "attendance row vanished after upsert ({}, {}, {})",
            mark.student_id, date, mark.course
        ))
    })
}

pub fn find_attendance_by_id(conn: &Connection, id: i64) -> AppResult<AttendanceRecord> {
    let sql = format!("{SELECT_ATTENDANCE} WHERE id = ?1");
    conn.query_row(&sql, [id], map_attendance)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Attendance record #{} not found", id)))
}

pub fn find_attendance(
    conn: &Connection,
    student_id: i64,
    date: &NaiveDate,
    course: &str,
) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!("{SELECT_ATTENDANCE} WHERE student_id = ?1 AND date = ?2 AND course = ?3");
    let r = conn
        .query_row(&sql, params![student_id, to_db(date), course], map_attendance)
        .optional()?;
    Ok(r)
}

/// Rows matching `filter`, newest date first, then by id.
pub fn list_attendance(
    conn: &Connection,
    filter: &AttendanceFilter,
) -> AppResult<Vec<AttendanceRecord>> {
    let (mut sql, values) = filter.to_sql();
    sql.push_str(" ORDER BY date DESC, id ASC");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_attendance(conn: &Connection, rec: &AttendanceRecord) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE attendance
         SET student_id = ?1, date = ?2, course = ?3, status = ?4, info = ?5
         WHERE id = ?6",
        params![
            rec.student_id,
            to_db(&rec.date),
            rec.course,
            rec.status.to_db_str(),
            rec.info,
            rec.id
        ],
    )
    .map_err(|e| {
        crate::db::map_unique(
            e,
            "attendance",
            format!("({}, {}, {})", rec.student_id, to_db(&rec.date), rec.course),
        )
    })?;
    if n == 0 {
        return Err(AppError::NotFound(format!(
            "Attendance record #{} not found",
            rec.id
        )));
    }
    Ok(())
}

pub fn delete_attendance(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM attendance WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::NotFound(format!("Attendance record #{} not found", id)));
    }
    Ok(())
}

pub fn count_attendance_for_student(conn: &Connection, student_id: i64) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE student_id = ?1",
        [student_id],
        |r| r.get(0),
    )?;
    Ok(n)
}
