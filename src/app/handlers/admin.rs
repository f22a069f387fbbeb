use super::student_names;
use crate::app::AppState;
use crate::app::outcome::{Flash, Outcome};
use crate::app::request::StudentAction;
use crate::app::views::{StudentsView, View};
use crate::core::access::{Operation, authorize};
use crate::core::auth::Session;
use crate::core::students::StudentLogic;
use crate::errors::AppResult;

/// `GET/POST /students` (admin only)
pub fn students(
    state: &AppState,
    session: Option<&Session>,
    action: StudentAction,
) -> AppResult<Outcome> {
    authorize(session, Operation::ManageStudents)?;
    let conn = state.conn();

    let flash = match action {
        StudentAction::View => None,
        StudentAction::Add(name) => Some(match StudentLogic::add(conn, &name)? {
            Some(s) => Flash::success(format!("Student '{}' added successfully.", s.name)),
            None => Flash::info(format!("Student '{}' not added.", name.trim())),
        }),
        StudentAction::Remove(name) => Some(match StudentLogic::remove(conn, &name)? {
            Some(n) => Flash::success(format!(
                "Student '{}' removed ({} attendance records deleted).",
                name.trim(),
                n
            )),
            None => Flash::info(format!("Student '{}' not found.", name.trim())),
        }),
        StudentAction::AddCourse(name) => {
            Some(match StudentLogic::add_course(conn, &state.courses, &name) {
                Some(c) => Flash::success(format!("Subject '{}' added successfully.", c)),
                None => Flash::info(format!("Subject '{}' not added.", name.trim())),
            })
        }
    };

    Ok(Outcome::page_with(
        View::Students(StudentsView {
            students: student_names(conn)?,
            courses: state.courses.list(),
        }),
        flash,
    ))
}
