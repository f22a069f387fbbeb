//! Date helpers shared by the store, the resolver and the renderers.
//!
//! Every date is stored as ISO `YYYY-MM-DD`; attendance dates are shown as
//! `DD-MM-YYYY` only when rendered.

use chrono::{Local, NaiveDate};

pub const ISO_FMT: &str = "%Y-%m-%d";
pub const ATTENDANCE_FMT: &str = "%d-%m-%Y";
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FMT).to_string()
}

/// Strict ISO parse (the format of every date form field).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_FMT).ok()
}

/// Accepts either `YYYY-MM-DD` or the attendance display form `DD-MM-YYYY`.
pub fn parse_any_date(s: &str) -> Option<NaiveDate> {
    let t = s.trim();
    NaiveDate::parse_from_str(t, ISO_FMT)
        .or_else(|_| NaiveDate::parse_from_str(t, ATTENDANCE_FMT))
        .ok()
}

pub fn to_db(d: &NaiveDate) -> String {
    d.format(ISO_FMT).to_string()
}

pub fn to_attendance(d: &NaiveDate) -> String {
    d.format(ATTENDANCE_FMT).to_string()
}

/// Map a stored ISO date back into NaiveDate inside a rusqlite row mapper.
pub fn from_db(raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, ISO_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(crate::errors::AppError::InvalidDate(raw.to_string())),
        )
    })
}
