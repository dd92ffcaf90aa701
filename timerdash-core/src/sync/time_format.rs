// File: timerdash-core/src/sync/time_format.rs

use crate::Error;

/// Renders a second count as `[-]MM:SS`. Minutes are never truncated, so
/// `6000` becomes `100:00`. A missing value renders as `00:00`.
pub fn format_clock(seconds: Option<i64>) -> String {
    let Some(seconds) = seconds else {
        return "00:00".to_string();
    };
    let sign = if seconds < 0 { "-" } else { "" };
    let magnitude = seconds.unsigned_abs();
    format!("{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
}

/// Same as [`format_clock`] for unsigned event times.
pub fn format_offset(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Parses `MM:SS`, `-MM:SS` or a plain (optionally negative) second count.
pub fn parse_clock(input: &str) -> Result<i64, Error> {
    let raw = input.trim();
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let invalid = || Error::InvalidInput(format!("'{}' is not a time (use MM:SS or seconds)", input));

    let magnitude: u64 = match body.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
            let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
            if seconds >= 60 || seconds_digits(body) != 2 {
                return Err(invalid());
            }
            minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(seconds))
                .ok_or_else(invalid)?
        }
        None => body.parse().map_err(|_| invalid())?,
    };

    let value = i64::try_from(magnitude).map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}

fn seconds_digits(body: &str) -> usize {
    body.rsplit(':').next().map(str::len).unwrap_or(0)
}
