use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Resolve an optional `YYYY-MM-DD` argument, defaulting to today.
pub fn resolve_date(arg: &Option<String>) -> AppResult<NaiveDate> {
    match arg {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(today()),
    }
}
