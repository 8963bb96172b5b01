//! Time utilities: formatting minutes and countdown parsing.

use crate::errors::{AppError, AppResult};

pub fn mins2readable(mins: i64) -> String {
    let m = mins.abs();
    let sign = if mins < 0 { "-" } else { "" };
    format!("{}{:02}h {:02}m", sign, m / 60, m % 60)
}

/// Parse a countdown value in minutes; `0` disables the countdown.
pub fn parse_countdown(s: &str) -> AppResult<u32> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| AppError::InvalidCountdown(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(0), "00h 00m");
        assert_eq!(mins2readable(135), "02h 15m");
        assert_eq!(mins2readable(-5), "-00h 05m");
    }

    #[test]
    fn countdown_parsing() {
        assert_eq!(parse_countdown(" 25 ").unwrap(), 25);
        assert!(parse_countdown("-1").is_err());
        assert!(parse_countdown("abc").is_err());
    }
}
