use super::{field, student_names};
use crate::app::AppState;
use crate::app::outcome::{Flash, Outcome};
use crate::app::request::Filters;
use crate::app::views::{
    MarkView, RecordsView, ReportRow, ReportView, SnapshotEntry, SnapshotView,
    StudentDetailView, View,
};
use crate::core::access::{Operation, authorize, authorize_student_detail};
use crate::core::attendance::{AttendanceLogic, MarkEntry, build_daily_view};
use crate::core::auth::Session;
use crate::core::range::{RangeKind, resolve_optional, resolve_str};
use crate::db::students::list_students;
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use crate::utils::date::{ISO_FMT, parse_any_date, parse_date, to_attendance, today};
use chrono::NaiveDate;
use std::collections::HashMap;

const ALL: &str = "all";

fn parse_form_date(raw: Option<String>) -> AppResult<NaiveDate> {
    match field(raw) {
        Some(d) => parse_date(&d).ok_or(AppError::InvalidDate(d)),
        None => Ok(today()),
    }
}

/// `GET/POST /mark`
pub fn mark(
    state: &AppState,
    session: Option<&Session>,
    date: Option<String>,
    course: Option<String>,
    entries: Option<HashMap<String, MarkEntry>>,
) -> AppResult<Outcome> {
    authorize(session, Operation::MarkAttendance)?;
    let conn = state.conn();

    let date = parse_form_date(date)?;
    let course = field(course).or_else(|| state.courses.first());

    let mut flash = None;
    let show_records = entries.is_some();
    if let Some(entries) = entries {
        let course = course
            .as_deref()
            .ok_or_else(|| AppError::InvalidInput("a course is required".into()))?;
        AttendanceLogic::mark(conn, date, course, &entries)?;
        flash = Some(Flash::success("Attendance saved successfully!"));
    }

    let attendance = match &course {
        Some(c) => AttendanceLogic::daily_view(conn, date, c)?,
        None => build_daily_view(&list_students(conn)?, &[]),
    };

    Ok(Outcome::page_with(
        View::Mark(MarkView {
            current_date: to_attendance(&date),
            selected_course: course,
            courses: state.courses.list(),
            attendance,
            show_records,
        }),
        flash,
    ))
}

/// `GET /student/<name>`
pub fn student_detail(
    state: &AppState,
    session: Option<&Session>,
    name: &str,
    filters: Filters,
) -> AppResult<Outcome> {
    authorize_student_detail(session, name)?;

    let selected_course = field(filters.course).unwrap_or_else(|| ALL.to_string());
    let date_range = field(filters.range).unwrap_or_else(|| ALL.to_string());
    let selected_date = field(filters.date);

    let course = (selected_course != ALL).then_some(selected_course.as_str());
    let bounds = resolve_optional(selected_date.as_deref(), Some(date_range.as_str()));
    let summary = AttendanceLogic::student_summary(state.conn(), name, course, bounds)?;

    Ok(Outcome::page(View::StudentDetail(StudentDetailView {
        name: name.to_string(),
        summary,
        courses: state.courses.list(),
        selected_course,
        date_range,
        selected_date: selected_date
            .unwrap_or_else(|| today().format(ISO_FMT).to_string()),
    })))
}

/// `GET /attendance/<date>`: every student's status on one day, any course.
/// An unreadable date matches no record, so everybody shows absent.
pub fn snapshot(state: &AppState, session: Option<&Session>, date: &str) -> AppResult<Outcome> {
    authorize(session, Operation::ViewAllAttendance)?;
    let conn = state.conn();

    let rows: Vec<(String, Status)> = match parse_any_date(date) {
        Some(d) => AttendanceLogic::daily_snapshot(conn, d)?,
        None => student_names(conn)?
            .into_iter()
            .map(|n| (n, Status::Absent))
            .collect(),
    };

    Ok(Outcome::page(View::DailySnapshot(SnapshotView {
        date: date.to_string(),
        attendance: rows
            .into_iter()
            .map(|(name, status)| SnapshotEntry { name, status })
            .collect(),
    })))
}

/// `GET /attendance-records`: needs both a date and a course.
pub fn records(state: &AppState, session: Option<&Session>, filters: Filters) -> AppResult<Outcome> {
    authorize(session, Operation::ViewAllAttendance)?;

    let selected_date = field(filters.date);
    let selected_course = field(filters.course);
    let range_type = field(filters.range).unwrap_or_else(|| RangeKind::Day.as_str().to_string());

    let records = match (&selected_date, &selected_course) {
        (Some(d), Some(c)) => {
            let bounds = resolve_str(Some(d.as_str()), Some(range_type.as_str()));
            AttendanceLogic::grouped_records(state.conn(), c, bounds)?
        }
        _ => Vec::new(),
    };

    Ok(Outcome::page(View::Records(RecordsView {
        courses: state.courses.list(),
        selected_date,
        selected_course,
        range_type,
        records,
    })))
}

/// `GET /report`: one student, one course, newest first.
pub fn report(
    state: &AppState,
    session: Option<&Session>,
    subject: Option<String>,
    student: Option<String>,
) -> AppResult<Outcome> {
    authorize(session, Operation::ViewAllAttendance)?;
    let conn = state.conn();

    let selected_subject = field(subject);
    let selected_student = field(student);

    let records = match (&selected_subject, &selected_student) {
        (Some(c), Some(s)) => AttendanceLogic::course_report(conn, s, c)?
            .into_iter()
            .map(|r| ReportRow {
                date: r.display_date(),
                status: r.status,
                info: r.info,
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(Outcome::page(View::Report(ReportView {
        students: student_names(conn)?,
        courses: state.courses.list(),
        selected_subject,
        selected_student,
        records,
    })))
}
