use super::status::Status;
use crate::utils::date::ATTENDANCE_FMT;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,  // ⇔ attendance.student_id
    pub date: NaiveDate,  // ⇔ attendance.date (TEXT "YYYY-MM-DD")
    pub course: String,   // ⇔ attendance.course
    pub status: Status,   // ⇔ attendance.status ('P' | 'A')
    pub info: String,     // ⇔ attendance.info
}

impl AttendanceRecord {
    /// Date in the attendance display format (DD-MM-YYYY).
    pub fn display_date(&self) -> String {
        self.date.format(ATTENDANCE_FMT).to_string()
    }
}

/// Values written by one attendance mark; the key is (student, date, course).
#[derive(Debug, Clone)]
pub struct AttendanceMark {
    pub student_id: i64,
    pub date: NaiveDate,
    pub course: String,
    pub status: Status,
    pub info: String,
}
