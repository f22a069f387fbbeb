use crate::core::attendance::MarkEntry;
use crate::core::homework::Grade;
use std::collections::HashMap;

/// Filters exactly as typed by the user; dates are `YYYY-MM-DD` strings
/// and are parsed (leniently) by the handlers.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub date: Option<String>,
    pub course: Option<String>,
    pub range: Option<String>,
}

#[derive(Debug, Clone)]
pub enum StudentAction {
    View,
    Add(String),
    Remove(String),
    AddCourse(String),
}

#[derive(Debug, Clone)]
pub enum HomeworkAction {
    Assign {
        date: Option<String>,
        course: Option<String>,
        description: String,
        grades: HashMap<String, Grade>,
    },
    AnswerDoubt {
        doubt_id: i64,
        answer: String,
    },
}

#[derive(Debug, Clone)]
pub enum Request {
    /// `GET /front`
    Front,
    /// `GET /mark` (entries = None) or `POST /mark`
    Mark {
        date: Option<String>,
        course: Option<String>,
        entries: Option<HashMap<String, MarkEntry>>,
    },
    /// `GET /student/<name>`; course `all` and range `all` disable filtering
    StudentDetail { name: String, filters: Filters },
    /// `GET /attendance/<date>`
    DailySnapshot { date: String },
    /// `GET/POST /students`
    Students(StudentAction),
    /// `GET /attendance-records`
    AttendanceRecords(Filters),
    /// `GET/POST /homework`
    Homework {
        filters: Filters,
        action: Option<HomeworkAction>,
    },
    /// `GET/POST /student-homework`
    StudentHomework {
        filter_course: Option<String>,
        ask: Option<(i64, String)>,
    },
    /// `GET /report`
    Report {
        subject: Option<String>,
        student: Option<String>,
    },
}
