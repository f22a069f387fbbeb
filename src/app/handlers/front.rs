use super::student_names;
use crate::app::AppState;
use crate::app::outcome::Outcome;
use crate::app::views::{FrontView, View};
use crate::core::access::{Operation, authorize};
use crate::core::auth::Session;
use crate::errors::AppResult;

/// Landing page for any logged-in user.
pub fn landing(state: &AppState, session: Option<&Session>) -> AppResult<Outcome> {
    let session = authorize(session, Operation::Landing)?;

    Ok(Outcome::page(View::Front(FrontView {
        students: student_names(state.conn())?,
        user_role: session.role,
        user_email: session.user.clone(),
        student_name: session.student_name.clone(),
    })))
}
