//! Attendance marking and the views built from attendance rows.

use crate::db::attendance::{AttendanceFilter, list_attendance, upsert_attendance};
use crate::db::log::audit;
use crate::db::students::{find_student_by_name, list_students};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceMark, AttendanceRecord};
use crate::models::status::Status;
use crate::models::student::Student;
use crate::utils::date::to_attendance;
use crate::utils::formatting::percentage;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_INFO: &str = "N/A";
pub const NOT_INFORMED: &str = "not_informed";

// ---------------------------
// Daily view
// ---------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    pub name: String,
    pub status: Status,
    pub info: String,
}

/// One row per student for a single (date, course), in roster order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DailyView {
    pub entries: Vec<DailyEntry>,
    pub present_count: usize,
    pub absent_count: usize,
}

impl DailyView {
    pub fn get(&self, name: &str) -> Option<&DailyEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Every student starts as absent with info `N/A`; matching records
/// overwrite that default.
pub fn build_daily_view(students: &[Student], records: &[AttendanceRecord]) -> DailyView {
    let mut entries: Vec<DailyEntry> = students
        .iter()
        .map(|s| DailyEntry {
            name: s.name.clone(),
            status: Status::Absent,
            info: DEFAULT_INFO.to_string(),
        })
        .collect();

    let index: HashMap<i64, usize> = students
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    for r in records {
        if let Some(&i) = index.get(&r.student_id) {
            entries[i].status = r.status;
            entries[i].info = r.info.clone();
        }
    }

    let present_count = entries.iter().filter(|e| e.status.is_present()).count();
    let absent_count = entries.len() - present_count;

    DailyView {
        entries,
        present_count,
        absent_count,
    }
}

// ---------------------------
// Student summary
// ---------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub date: String, // DD-MM-YYYY
    pub status: Status,
    pub course: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    pub records: Vec<SummaryRow>,
    pub total_days: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub percentage: f64,
}

/// Counts and percentage over `records`, newest first.
pub fn build_student_summary(records: &[AttendanceRecord]) -> StudentSummary {
    let mut sorted: Vec<&AttendanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        (b.date, b.status.code(), &b.course).cmp(&(a.date, a.status.code(), &a.course))
    });

    let total_days = sorted.len();
    let present_count = sorted.iter().filter(|r| r.status.is_present()).count();
    let absent_count = total_days - present_count;

    StudentSummary {
        records: sorted
            .into_iter()
            .map(|r| SummaryRow {
                date: r.display_date(),
                status: r.status,
                course: r.course.clone(),
            })
            .collect(),
        total_days,
        present_count,
        absent_count,
        percentage: percentage(present_count, total_days),
    }
}

// ---------------------------
// Grouped report
// ---------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordEntry {
    pub date: String, // DD-MM-YYYY
    pub status: Status,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecords {
    pub name: String,
    pub entries: Vec<RecordEntry>,
}

/// Group by student name, keeping the order in which names first appear.
/// Rows whose student no longer exists are dropped.
pub fn build_grouped_records(
    records: &[AttendanceRecord],
    names: &HashMap<i64, String>,
) -> Vec<StudentRecords> {
    let mut out: Vec<StudentRecords> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for r in records {
        let Some(name) = names.get(&r.student_id) else {
            continue;
        };
        let i = *slot.entry(name.as_str()).or_insert_with(|| {
            out.push(StudentRecords {
                name: name.clone(),
                entries: Vec::new(),
            });
            out.len() - 1
        });
        out[i].entries.push(RecordEntry {
            date: r.display_date(),
            status: r.status,
            info: r.info.clone(),
        });
    }

    out
}

fn name_index(students: &[Student]) -> HashMap<i64, String> {
    students.iter().map(|s| (s.id, s.name.clone())).collect()
}

// ---------------------------
// Store-backed operations
// ---------------------------

/// Status and note submitted for one student on the mark form.
#[derive(Debug, Clone)]
pub struct MarkEntry {
    pub status: Status,
    pub info: String,
}

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Save one mark per current student for (date, course).
    /// Students missing from `entries` are stored absent / `not_informed`.
    /// Returns the number of rows written.
    pub fn mark(
        conn: &Connection,
        date: NaiveDate,
        course: &str,
        entries: &HashMap<String, MarkEntry>,
    ) -> AppResult<usize> {
        let students = list_students(conn)?;
        let tx = conn.unchecked_transaction()?;

        for s in &students {
            let (status, info) = match entries.get(&s.name) {
                Some(e) => (e.status, e.info.clone()),
                None => (Status::Absent, NOT_INFORMED.to_string()),
            };
            upsert_attendance(
                &tx,
                &AttendanceMark {
                    student_id: s.id,
                    date,
                    course: course.to_string(),
                    status,
                    info,
                },
            )?;
        }
        tx.commit()?;

        audit(
            conn,
            "mark",
            course,
            &format!(
                "Attendance saved for {} students on {}",
                students.len(),
                to_attendance(&date)
            ),
        );
        Ok(students.len())
    }

    pub fn daily_view(conn: &Connection, date: NaiveDate, course: &str) -> AppResult<DailyView> {
        let students = list_students(conn)?;
        let records = list_attendance(conn, &AttendanceFilter::on(date).course(Some(course)))?;
        Ok(build_daily_view(&students, &records))
    }

    /// Status of every student on `date` across all courses, absent by
    /// default. With several courses on the same day the last row read wins.
    pub fn daily_snapshot(conn: &Connection, date: NaiveDate) -> AppResult<Vec<(String, Status)>> {
        let students = list_students(conn)?;
        let mut records = list_attendance(conn, &AttendanceFilter::on(date))?;
        records.sort_by_key(|r| r.id);

        let mut status: HashMap<i64, Status> = HashMap::new();
        for r in &records {
            status.insert(r.student_id, r.status);
        }

        Ok(students
            .into_iter()
            .map(|s| {
                let st = status.get(&s.id).copied().unwrap_or(Status::Absent);
                (s.name, st)
            })
            .collect())
    }

    /// Summary for one student, optionally restricted to a course and an
    /// inclusive date interval.
    pub fn student_summary(
        conn: &Connection,
        name: &str,
        course: Option<&str>,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<StudentSummary> {
        let student = find_student_by_name(conn, name)?
            .ok_or_else(|| AppError::NotFound(format!("Student {} not found", name)))?;

        let filter = AttendanceFilter::for_student(student.id)
            .course(course)
            .between(bounds);
        let records = list_attendance(conn, &filter)?;
        Ok(build_student_summary(&records))
    }

    /// Records of one course inside `bounds` (all dates when `None`),
    /// grouped by student, oldest first inside each group.
    pub fn grouped_records(
        conn: &Connection,
        course: &str,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<StudentRecords>> {
        let students = list_students(conn)?;
        let filter = AttendanceFilter::default()
            .course(Some(course))
            .between(bounds);
        let mut records = list_attendance(conn, &filter)?;
        records.sort_by_key(|r| (r.date, r.id));
        Ok(build_grouped_records(&records, &name_index(&students)))
    }

    /// Chronological (newest first) list for one student and one course.
    /// An unknown student yields an empty list.
    pub fn course_report(
        conn: &Connection,
        student: &str,
        course: &str,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let Some(s) = find_student_by_name(conn, student)? else {
            return Ok(Vec::new());
        };
        list_attendance(
            conn,
            &AttendanceFilter::for_student(s.id).course(Some(course)),
        )
    }
}
