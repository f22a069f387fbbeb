//! SQLite connection wrapper (one connection per process).

use crate::errors::AppResult;
use crate::utils::path::expand_tilde;
use rusqlite::Connection;
use std::fs;
use std::time::Duration;

/// A second process (e.g. a one-shot command next to a running shell)
/// waits this long for the write lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open (or create) the database file, creating its directory if needed.
    /// A leading `~` in `path` is expanded.
    pub fn new(path: &str) -> AppResult<Self> {
        let p = expand_tilde(path);
        if let Some(dir) = p.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let conn = Connection::open(&p)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }
}
