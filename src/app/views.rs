//! View models handed to the renderer. Never raw store rows.

use crate::core::attendance::{DailyView, StudentRecords, StudentSummary};
use crate::core::homework::{DoubtView, HomeworkDay, StudentHomework};
use crate::models::role::Role;
use crate::models::status::Status;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FrontView {
    pub students: Vec<String>,
    pub user_role: Role,
    pub user_email: String,
    pub student_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkView {
    pub current_date: String, // DD-MM-YYYY
    pub selected_course: Option<String>,
    pub courses: Vec<String>,
    pub attendance: DailyView,
    pub show_records: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentDetailView {
    pub name: String,
    pub summary: StudentSummary,
    pub courses: Vec<String>,
    pub selected_course: String,
    pub date_range: String,
    pub selected_date: String, // YYYY-MM-DD
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEntry {
    pub name: String,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotView {
    pub date: String,
    pub attendance: Vec<SnapshotEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentsView {
    pub students: Vec<String>,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordsView {
    pub courses: Vec<String>,
    pub selected_date: Option<String>,
    pub selected_course: Option<String>,
    pub range_type: String,
    pub records: Vec<StudentRecords>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeworkPageView {
    pub students: Vec<String>,
    pub courses: Vec<String>,
    pub selected_course: Option<String>,
    pub homework_records: Vec<HomeworkDay>,
    pub unanswered_doubts: Vec<DoubtView>,
    pub current_date: String, // YYYY-MM-DD
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentHomeworkView {
    pub student_name: String,
    pub courses: Vec<String>,
    pub filter_course: Option<String>,
    pub homework_data: Vec<StudentHomework>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub date: String, // DD-MM-YYYY
    pub status: Status,
    pub info: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub students: Vec<String>,
    pub courses: Vec<String>,
    pub selected_subject: Option<String>,
    pub selected_student: Option<String>,
    pub records: Vec<ReportRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", content = "data", rename_all = "snake_case")]
pub enum View {
    Front(FrontView),
    Mark(MarkView),
    StudentDetail(StudentDetailView),
    DailySnapshot(SnapshotView),
    Students(StudentsView),
    Records(RecordsView),
    Homework(HomeworkPageView),
    StudentHomework(StudentHomeworkView),
    Report(ReportView),
}
