use super::handlers::{admin, attendance, front, homework};
use super::outcome::{Flash, Outcome};
use super::request::Request;
use super::AppState;
use crate::core::auth::Session;
use crate::errors::{AppError, AppResult};

/// Dispatch one request on behalf of `session` (None = not logged in).
///
/// Access and validation failures never escape as errors: they become a
/// redirect (`/login`, `/front`), a not-found page or a rejection. Only
/// storage failures are returned as `Err`.
pub fn handle(state: &AppState, session: Option<&Session>, req: Request) -> AppResult<Outcome> {
    let result = match req {
        Request::Front => front::landing(state, session),
        Request::Mark {
            date,
            course,
            entries,
        } => attendance::mark(state, session, date, course, entries),
        Request::StudentDetail { name, filters } => {
            attendance::student_detail(state, session, &name, filters)
        }
        Request::DailySnapshot { date } => attendance::snapshot(state, session, &date),
        Request::Students(action) => admin::students(state, session, action),
        Request::AttendanceRecords(filters) => attendance::records(state, session, filters),
        Request::Homework { filters, action } => homework::homework(state, session, filters, action),
        Request::StudentHomework { filter_course, ask } => {
            homework::student_homework(state, session, filter_course, ask)
        }
        Request::Report { subject, student } => attendance::report(state, session, subject, student),
    };

    match result {
        Ok(outcome) => Ok(outcome),
        Err(AppError::AuthRequired) => Ok(Outcome::redirect(
            "/login",
            Flash::error(AppError::AuthRequired.to_string()),
        )),
        Err(AppError::Forbidden(msg)) => Ok(Outcome::redirect("/front", Flash::error(msg))),
        Err(AppError::NotFound(message)) => Ok(Outcome::NotFound { message }),
        Err(
            e @ (AppError::IntegrityViolation { .. }
            | AppError::InvalidDate(_)
            | AppError::InvalidStatus(_)
            | AppError::InvalidInput(_)),
        ) => Ok(Outcome::Rejected {
            message: e.to_string(),
        }),
        Err(e) => Err(e),
    }
}
