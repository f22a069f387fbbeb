//! Transport-free request surface.
//!
//! Every endpoint of the application is a `Request`; `router::handle`
//! authorizes it against the caller's `Session` and answers with an
//! `Outcome` (a page view model, a redirect, not-found or a rejection).
//! The CLI and the interactive shell only build requests and render
//! outcomes.

mod handlers;
pub mod outcome;
pub mod request;
pub mod router;
pub mod views;

pub use outcome::{Flash, FlashLevel, Outcome};
pub use request::Request;
pub use router::handle;

use crate::config::Config;
use crate::core::auth::CredentialStore;
use crate::core::courses::CourseCatalog;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Process-wide state shared by all requests.
pub struct AppState {
    pub pool: DbPool,
    pub courses: CourseCatalog,
    pub credentials: Box<dyn CredentialStore>,
}

impl AppState {
    /// Open the configured database, migrate it and seed the roster.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::new(&cfg.database)?;
        Self::with_pool(pool, cfg)
    }

    pub fn with_pool(pool: DbPool, cfg: &Config) -> AppResult<Self> {
        init_db(&pool.conn, &cfg.students)?;
        Ok(Self {
            pool,
            courses: CourseCatalog::new(&cfg.courses),
            credentials: Box::new(cfg.credentials()),
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}
