pub mod attendance;
pub mod homework;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod students;

use crate::errors::AppError;
use rusqlite::ErrorCode;

/// Turn a UNIQUE violation into `IntegrityViolation` carrying the conflicting
/// key; every other SQLite error passes through unchanged.
pub(crate) fn map_unique(err: rusqlite::Error, entity: &'static str, key: String) -> AppError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            AppError::IntegrityViolation { entity, key }
        }
        _ => AppError::Db(err),
    }
}
