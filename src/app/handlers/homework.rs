use super::{field, student_names};
use crate::app::AppState;
use crate::app::outcome::{Flash, Outcome};
use crate::app::request::{Filters, HomeworkAction};
use crate::app::views::{HomeworkPageView, StudentHomeworkView, View};
use crate::core::access::{Operation, authorize};
use crate::core::auth::Session;
use crate::core::homework::HomeworkLogic;
use crate::db::students::find_student_by_name;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{parse_date, to_db, today};

/// `GET/POST /homework`: assign and grade, answer doubts, filtered listing.
pub fn homework(
    state: &AppState,
    session: Option<&Session>,
    filters: Filters,
    action: Option<HomeworkAction>,
) -> AppResult<Outcome> {
    authorize(session, Operation::ManageHomework)?;
    let conn = state.conn();

    let mut selected_course = None;
    let mut flash = None;

    match action {
        None => {}
        Some(HomeworkAction::Assign {
            date,
            course,
            description,
            grades,
        }) => {
            let date = match field(date) {
                Some(d) => parse_date(&d).ok_or(AppError::InvalidDate(d))?,
                None => today(),
            };
            let course = field(course)
                .ok_or_else(|| AppError::InvalidInput("a course is required".into()))?;

            let hw = HomeworkLogic::assign_or_update(conn, date, &course, &description)?;
            HomeworkLogic::grade_all(conn, &hw, &grades)?;
            selected_course = Some(course);
            flash = Some(Flash::success("Homework and Exercism progress saved!"));
        }
        Some(HomeworkAction::AnswerDoubt { doubt_id, answer }) => {
            if HomeworkLogic::answer_doubt(conn, doubt_id, &answer)? {
                flash = Some(Flash::success("Answer submitted successfully!"));
            }
        }
    }

    let filter_course = field(filters.course);
    let homework_records = HomeworkLogic::build_teacher_view(
        conn,
        filters.date.as_deref(),
        field(filters.range).as_deref(),
        filter_course.as_deref(),
    )?;

    Ok(Outcome::page_with(
        View::Homework(HomeworkPageView {
            students: student_names(conn)?,
            courses: state.courses.list(),
            selected_course: selected_course.or(filter_course),
            homework_records,
            unanswered_doubts: HomeworkLogic::unanswered_doubts(conn)?,
            current_date: to_db(&today()),
        }),
        flash,
    ))
}

/// `GET/POST /student-homework`: the logged-in student's own homework.
pub fn student_homework(
    state: &AppState,
    session: Option<&Session>,
    filter_course: Option<String>,
    ask: Option<(i64, String)>,
) -> AppResult<Outcome> {
    let session = authorize(session, Operation::OwnHomework)?;
    let conn = state.conn();

    let student = match session.student_name.as_deref() {
        Some(name) => find_student_by_name(conn, name)?,
        None => None,
    };
    let Some(student) = student else {
        return Ok(Outcome::redirect(
            "/front",
            Flash::error("Student profile not found."),
        ));
    };

    let mut flash = None;
    if let Some((homework_id, question)) = ask
        && HomeworkLogic::submit_doubt(conn, homework_id, student.id, &question)?.is_some()
    {
        flash = Some(Flash::success(
            "Your question has been submitted successfully!",
        ));
    }

    let filter_course = field(filter_course);
    let homework_data =
        HomeworkLogic::build_student_view(conn, student.id, filter_course.as_deref())?;

    Ok(Outcome::page_with(
        View::StudentHomework(StudentHomeworkView {
            student_name: student.name,
            courses: state.courses.list(),
            filter_course,
            homework_data,
        }),
        flash,
    ))
}
