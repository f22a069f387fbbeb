//! Endpoint subcommands: build a `Request`, route it, render the outcome.

use crate::app::request::{Filters, HomeworkAction, Request, StudentAction};
use crate::app::{AppState, Outcome, handle as route};
use crate::cli::parser::{Cli, Commands};
use crate::cli::render::render;
use crate::config::Config;
use crate::core::attendance::{MarkEntry, NOT_INFORMED};
use crate::core::auth::{Session, login};
use crate::core::homework::Grade;
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use std::collections::HashMap;

/// Translate an endpoint subcommand. `None` for the non-endpoint ones
/// (init, config, log, login, logout, shell).
pub fn build(cmd: &Commands) -> Option<Request> {
    let req = match cmd.clone() {
        Commands::Front => Request::Front,
        Commands::Mark {
            date,
            course,
            present,
            info,
            save,
        } => Request::Mark {
            date,
            course,
            entries: save.then(|| mark_entries(&present, &info)),
        },
        Commands::Student {
            name,
            course,
            range,
            date,
        } => Request::StudentDetail {
            name,
            filters: Filters {
                date,
                course,
                range,
            },
        },
        Commands::Attendance { date } => Request::DailySnapshot { date },
        Commands::Students {
            add,
            remove,
            add_course,
        } => Request::Students(match (add, remove, add_course) {
            (Some(n), _, _) => StudentAction::Add(n),
            (_, Some(n), _) => StudentAction::Remove(n),
            (_, _, Some(c)) => StudentAction::AddCourse(c),
            _ => StudentAction::View,
        }),
        Commands::Records {
            date,
            course,
            range,
        } => Request::AttendanceRecords(Filters {
            date,
            course,
            range,
        }),
        Commands::Homework {
            filter_date,
            filter_course,
            filter_range,
            assign,
            date,
            course,
            description,
            marks,
            progress,
            answer_doubt,
            answer,
        } => {
            let action = if assign {
                Some(HomeworkAction::Assign {
                    date,
                    course,
                    description: description.unwrap_or_default(),
                    grades: grades(&marks, &progress),
                })
            } else {
                answer_doubt.map(|doubt_id| HomeworkAction::AnswerDoubt {
                    doubt_id,
                    answer: answer.unwrap_or_default(),
                })
            };
            Request::Homework {
                filters: Filters {
                    date: filter_date,
                    course: filter_course,
                    range: filter_range,
                },
                action,
            }
        }
        Commands::StudentHomework {
            filter_course,
            ask,
            question,
        } => Request::StudentHomework {
            filter_course,
            ask: ask.map(|id| (id, question.unwrap_or_default())),
        },
        Commands::Report { subject, student } => Request::Report { subject, student },
        Commands::Init
        | Commands::Config { .. }
        | Commands::Log { .. }
        | Commands::Login
        | Commands::Logout
        | Commands::Shell => return None,
    };
    Some(req)
}

/// Named students are present; everyone with a note but no `--present`
/// is absent with that note. Students in neither list are left out and
/// end up absent / `not_informed`.
fn mark_entries(present: &[String], info: &[(String, String)]) -> HashMap<String, MarkEntry> {
    let mut entries: HashMap<String, MarkEntry> = present
        .iter()
        .map(|n| {
            (
                n.trim().to_string(),
                MarkEntry {
                    status: Status::Present,
                    info: NOT_INFORMED.to_string(),
                },
            )
        })
        .collect();

    for (name, text) in info {
        entries
            .entry(name.clone())
            .or_insert_with(|| MarkEntry {
                status: Status::Absent,
                info: String::new(),
            })
            .info = text.clone();
    }
    entries
}

fn grades(marks: &[(String, String)], progress: &[(String, String)]) -> HashMap<String, Grade> {
    let mut out: HashMap<String, Grade> = HashMap::new();
    for (name, m) in marks {
        out.entry(name.clone()).or_default().marks = m.clone();
    }
    for (name, p) in progress {
        out.entry(name.clone()).or_default().progress = p.clone();
    }
    out
}

/// Session from the global `--role/--email/--password` flags, if given.
pub fn session_from_flags(cli: &Cli, state: &AppState) -> AppResult<Option<Session>> {
    let Some(role) = &cli.role else {
        return Ok(None);
    };
    let (Some(email), Some(password)) = (&cli.email, &cli.password) else {
        return Err(AppError::InvalidInput(
            "--email and --password are required with --role".into(),
        ));
    };
    login(state.credentials.as_ref(), role, email, password).map(Some)
}

/// A one-shot command has no next page to carry a redirect to, so
/// anything but a page becomes the matching error.
pub fn into_page(outcome: Outcome) -> AppResult<Outcome> {
    match outcome {
        Outcome::Page { .. } => Ok(outcome),
        Outcome::Redirect { to, .. } if to == "/login" => Err(AppError::AuthRequired),
        Outcome::Redirect { flash, .. } => Err(AppError::Forbidden(flash.message)),
        Outcome::NotFound { message } => Err(AppError::NotFound(message)),
        Outcome::Rejected { message } => Err(AppError::Rejected(message)),
    }
}

/// Run one endpoint command against a freshly opened database.
pub fn handle(cli: &Cli, cfg: &Config, req: Request) -> AppResult<()> {
    let state = AppState::open(cfg)?;
    let session = session_from_flags(cli, &state)?;
    let outcome = into_page(route(&state, session.as_ref(), req)?)?;
    render(&outcome, cli.json)
}
