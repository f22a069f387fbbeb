//! Which role may invoke which operation.
//!
//! | Operation                        | Student     | Teacher | Admin |
//! |----------------------------------|-------------|---------|-------|
//! | landing page                     | yes         | yes     | yes   |
//! | mark / view attendance for all   | no          | yes     | yes   |
//! | view one student's attendance    | own only    | yes     | yes   |
//! | manage students / courses        | no          | no      | yes   |
//! | assign homework / answer doubts  | no          | yes     | yes   |
//! | view own homework / submit doubt | own         | no      | no    |

use crate::core::auth::Session;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Landing,
    MarkAttendance,
    ViewAllAttendance,
    ViewStudentAttendance,
    ManageStudents,
    ManageHomework,
    OwnHomework,
}

impl Operation {
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Operation::Landing | Operation::ViewStudentAttendance => {
                &[Role::Student, Role::Teacher, Role::Admin]
            }
            Operation::MarkAttendance
            | Operation::ViewAllAttendance
            | Operation::ManageHomework => &[Role::Teacher, Role::Admin],
            Operation::ManageStudents => &[Role::Admin],
            Operation::OwnHomework => &[Role::Student],
        }
    }
}

pub fn is_allowed(role: Role, op: Operation) -> bool {
    op.allowed_roles().contains(&role)
}

/// Gate an operation. No session → `AuthRequired`; wrong role →
/// `Forbidden` carrying the notice shown on the landing page.
pub fn authorize(session: Option<&Session>, op: Operation) -> AppResult<&Session> {
    let session = session.ok_or(AppError::AuthRequired)?;
    if is_allowed(session.role, op) {
        return Ok(session);
    }

    let names: Vec<&str> = op.allowed_roles().iter().map(Role::as_str).collect();
    Err(AppError::Forbidden(format!(
        "Access denied. This page is only for {}.",
        names.join(" or ")
    )))
}

/// A student may only open their own detail page.
pub fn authorize_student_detail<'a>(
    session: Option<&'a Session>,
    name: &str,
) -> AppResult<&'a Session> {
    let session = authorize(session, Operation::ViewStudentAttendance)?;
    if session.is_student() && session.student_name.as_deref() != Some(name) {
        return Err(AppError::Forbidden(
            "You can only view your own attendance records.".to_string(),
        ));
    }
    Ok(session)
}
