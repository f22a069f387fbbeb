//! Expands a reference date into an inclusive [start, end] interval.

use crate::utils::date::parse_date;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    Day,
    Week,
    Month,
    Year,
}

impl RangeKind {
    /// Unknown or absent values fall back to `Day`.
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("week") => RangeKind::Week,
            Some("month") => RangeKind::Month,
            Some("year") => RangeKind::Year,
            _ => RangeKind::Day,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeKind::Day => "day",
            RangeKind::Week => "week",
            RangeKind::Month => "month",
            RangeKind::Year => "year",
        }
    }
}

/// Inclusive bounds of `kind` around `reference`.
///
/// - day:   the date itself
/// - week:  Monday..Sunday of the ISO week
/// - month: first..last day of the month
/// - year:  Jan 1..Dec 31
pub fn resolve(reference: NaiveDate, kind: RangeKind) -> (NaiveDate, NaiveDate) {
    match kind {
        RangeKind::Day => (reference, reference),
        RangeKind::Week => {
            let back = u64::from(reference.weekday().num_days_from_monday());
            let start = reference
                .checked_sub_days(Days::new(back))
                .unwrap_or(reference);
            let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
            (start, end)
        }
        RangeKind::Month => {
            let start = reference.with_day(1).unwrap_or(reference);
            let next_month = if reference.month() == 12 {
                NaiveDate::from_ymd_opt(reference.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(reference.year(), reference.month() + 1, 1)
            };
            let end = next_month
                .and_then(|d| d.pred_opt())
                .unwrap_or(reference);
            (start, end)
        }
        RangeKind::Year => {
            let y = reference.year();
            let start = NaiveDate::from_ymd_opt(y, 1, 1).unwrap_or(reference);
            let end = NaiveDate::from_ymd_opt(y, 12, 31).unwrap_or(reference);
            (start, end)
        }
    }
}

/// Bounds for a raw `YYYY-MM-DD` form value.
///
/// A missing or malformed date means "no filtering" and yields `None`;
/// the caller then passes every record through.
pub fn resolve_str(reference: Option<&str>, range: Option<&str>) -> Option<(NaiveDate, NaiveDate)> {
    let d = parse_date(reference?)?;
    Some(resolve(d, RangeKind::parse(range)))
}

/// Like `resolve_str`, but a range of `all` (or no range at all) also means
/// "no filtering". Used by the per-student detail page.
pub fn resolve_optional(
    reference: Option<&str>,
    range: Option<&str>,
) -> Option<(NaiveDate, NaiveDate)> {
    match range.map(str::trim) {
        None | Some("") | Some("all") => None,
        r => resolve_str(reference, r),
    }
}
