use crate::error::{BragError, Result};
use crate::model::FilterSet;
use chrono::{Datelike, DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use tracing::warn;

/// Source of "now" for relative `--since` values.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// git's approxidate silently drops `--since`/`--until` from year 2100 on.
pub const LAST_FILTERABLE_YEAR: i32 = 2099;

/// Parses compact durations made of minutes, hours and days, e.g. `7d` or `2h30m`.
pub fn parse_duration(input: &str) -> Result<chrono::Duration> {
    let invalid = || BragError::InvalidDate(format!("invalid duration: {input}"));

    let starts_with_digit = input.chars().next().is_some_and(|c| c.is_ascii_digit());
    let ends_with_unit = input.ends_with(['m', 'h', 'd']);
    let only_known = input
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, 'm' | 'h' | 'd'));
    if !starts_with_digit || !ends_with_unit || !only_known {
        return Err(invalid());
    }

    // humantime wants each component separated
    let mut spaced = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        spaced.push(c);
        if !c.is_ascii_digit() {
            spaced.push(' ');
        }
    }

    let std_duration = humantime::parse_duration(spaced.trim()).map_err(|_| invalid())?;
    chrono::Duration::from_std(std_duration).map_err(|_| invalid())
}

pub fn parse_datetime(input: &str) -> Result<DateTime<FixedOffset>> {
    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return local_instant(naive, input);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return local_instant(naive, input);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Ok(dt);
    }

    Err(BragError::InvalidDate(format!("invalid datetime: {input}")))
}

fn local_instant(naive: NaiveDateTime, input: &str) -> Result<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| BragError::InvalidDate(format!("nonexistent local time: {input}")))
}

/// `--since` takes either a duration back from now or an absolute datetime.
pub fn resolve_since(input: &str, clock: &dyn Clock) -> Result<DateTime<FixedOffset>> {
    let since = match parse_duration(input) {
        Ok(duration) => clock
            .now()
            .checked_sub_signed(duration)
            .ok_or_else(|| BragError::InvalidDate(format!("Duration overflow for '{input}'")))?,
        Err(_) => parse_datetime(input)?,
    };
    warn_if_unfilterable("--since", &since);
    Ok(since)
}

pub fn resolve_until(input: &str) -> Result<DateTime<FixedOffset>> {
    let until = parse_datetime(input)?;
    warn_if_unfilterable("--until", &until);
    Ok(until)
}

pub fn beyond_git_range(dt: &DateTime<FixedOffset>) -> bool {
    dt.year() > LAST_FILTERABLE_YEAR
}

fn warn_if_unfilterable(flag: &str, dt: &DateTime<FixedOffset>) {
    if beyond_git_range(dt) {
        warn!(
            "{flag} {} is after {LAST_FILTERABLE_YEAR}; git ignores it and totals will not be filtered",
            dt.to_rfc3339()
        );
    }
}

pub fn format_output_date(dt: &DateTime<FixedOffset>) -> String {
    if dt.hour() == 0 && dt.minute() == 0 && dt.second() == 0 {
        dt.format("%b %-d, %Y").to_string()
    } else {
        dt.format("%b %-d, %Y %H:%M:%S").to_string()
    }
}

pub fn date_range_label(filters: &FilterSet) -> Option<String> {
    match (&filters.since, &filters.until) {
        (Some(since), Some(until)) => Some(format!(
            "{} - {}",
            format_output_date(since),
            format_output_date(until)
        )),
        (Some(since), None) => Some(format!("Since {}", format_output_date(since))),
        (None, Some(until)) => Some(format!("Until {}", format_output_date(until))),
        (None, None) => None,
    }
}
