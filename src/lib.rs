//! attendtrack library root.
//! Exposes the CLI parser, the high-level run() function and the
//! transport-free application core.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Shell => cli::commands::shell::handle(cli, cfg),
        Commands::Login => {
            // a one-shot process has nowhere to keep the session
            let state = app::AppState::open(cfg)?;
            match cli::commands::request::session_from_flags(cli, &state)? {
                Some(s) => {
                    ui::messages::success(format!("Credentials valid for {} ({})", s.user, s.role));
                    Ok(())
                }
                None => Err(errors::AppError::InvalidInput(
                    "login needs --role, --email and --password".into(),
                )),
            }
        }
        Commands::Logout => {
            ui::messages::info("Nothing to do: sessions only live inside `attendtrack shell`.");
            Ok(())
        }
        cmd => match cli::commands::request::build(cmd) {
            Some(req) => cli::commands::request::handle(cli, cfg, req),
            None => Ok(()),
        },
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
