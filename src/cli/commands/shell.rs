//! Interactive shell: one `AppState`, one session, many commands.

use super::{config, request};
use crate::app::{AppState, handle as route};
use crate::cli::parser::{Cli, Commands};
use crate::cli::render::render;
use crate::config::Config;
use crate::core::auth::Session;
use crate::core::log::LogLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const PROMPT: &str = "attendtrack> ";

fn readline_error(e: ReadlineError) -> AppError {
    AppError::Other(format!("shell: {}", e))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let state = AppState::open(cfg)?;
    let mut session = request::session_from_flags(cli, &state)?;
    let mut rl = DefaultEditor::new().map_err(readline_error)?;

    messages::info("attendtrack shell: 'help' lists the commands, 'exit' quits.");

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(l) => l,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(readline_error(e)),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }
        let _ = rl.add_history_entry(line);

        let args = std::iter::once("attendtrack".to_string()).chain(split_line(line));
        let parsed = match Cli::try_parse_from(args) {
            Ok(c) => c,
            Err(e) => {
                let _ = e.print();
                continue;
            }
        };

        if let Err(e) = run_line(&state, &mut session, cfg, &parsed) {
            match e {
                AppError::Db(_) | AppError::Io(_) => return Err(e),
                other => messages::error(other),
            }
        }
    }

    Ok(())
}

fn run_line(
    state: &AppState,
    session: &mut Option<Session>,
    cfg: &Config,
    cli: &Cli,
) -> AppResult<()> {
    match &cli.command {
        Commands::Login => {
            let s = request::session_from_flags(cli, state)?.ok_or_else(|| {
                AppError::InvalidInput("login needs --role, --email and --password".into())
            })?;
            messages::success(format!("Logged in as {} ({})", s.user, s.role));
            *session = Some(s);
        }
        Commands::Logout => {
            *session = None;
            messages::success("You have been logged out successfully.");
        }
        Commands::Config { .. } => config::handle(&cli.command, cfg)?,
        Commands::Log { .. } => LogLogic::print_log(state.conn())?,
        Commands::Init | Commands::Shell => messages::warning("Not available inside the shell."),
        cmd => {
            let Some(req) = request::build(cmd) else {
                return Ok(());
            };
            // flags on the line authenticate just this command
            let one_shot = request::session_from_flags(cli, state)?;
            let who = one_shot.as_ref().or(session.as_ref());
            render(&route(state, who, req)?, cli.json)?;
        }
    }
    Ok(())
}

/// Whitespace split honouring single and double quotes.
pub fn split_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut quote: Option<char> = None;
    let mut has_token = false;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => cur.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                has_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if has_token {
                    out.push(std::mem::take(&mut cur));
                    has_token = false;
                }
            }
            (None, c) => {
                cur.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        out.push(cur);
    }
    out
}
