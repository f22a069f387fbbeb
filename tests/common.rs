#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use attendtrack::app::views::View;
use attendtrack::app::{AppState, Outcome, Request, handle};
use attendtrack::config::Config;
use attendtrack::core::auth::{Session, login};
use attendtrack::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn atk() -> Command {
    cargo_bin_cmd!("attendtrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_attendtrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// `init` through the CLI (test mode: no config file is written)
pub fn init_cli(db_path: &str) {
    atk()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh application state on a temp-dir database with the default roster
pub fn open_state(name: &str) -> AppState {
    let db_path = setup_test_db(name);
    let cfg = Config {
        database: db_path.clone(),
        ..Config::default()
    };
    AppState::with_pool(DbPool::new(&db_path).expect("open db"), &cfg).expect("init state")
}

pub fn session(state: &AppState, role: &str, email: &str, password: &str) -> Session {
    login(state.credentials.as_ref(), role, email, password).expect("login")
}

pub fn teacher(state: &AppState) -> Session {
    session(state, "Teacher", "teacher@example.com", "teacher123")
}

pub fn admin(state: &AppState) -> Session {
    session(state, "Admin", "admin@example.com", "admin123")
}

/// Student session for a builtin demo account, e.g. `student(&st, "aswin")`
pub fn student(state: &AppState, login_name: &str) -> Session {
    session(
        state,
        "Student",
        &format!("{}@example.com", login_name),
        "student123",
    )
}

pub fn call(state: &AppState, who: Option<&Session>, req: Request) -> Outcome {
    handle(state, who, req).expect("request handled")
}

/// The page view of an outcome; panics on redirects and errors.
pub fn page(outcome: Outcome) -> View {
    match outcome {
        Outcome::Page { view, .. } => view,
        other => panic!("expected a page, got {:?}", other),
    }
}
