// Date utility functions
// Local wall-clock helpers shared by navigation, projection and the CLI

use anyhow::{anyhow, bail, Context, Result};
use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone,
};

/// Resolve local midnight for `date`.
///
/// When a DST transition makes midnight ambiguous the earlier instant wins; when
/// midnight does not exist locally the naive value is interpreted as UTC.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    to_local(naive)
}

/// Interpret a naive wall-clock time in the local zone.
///
/// Times skipped by a DST transition resolve to the first wall-clock time
/// after the gap.
pub fn to_local(naive: NaiveDateTime) -> DateTime<Local> {
    resolve_wall_clock(naive, |wall| Local.from_local_datetime(wall))
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

/// Earliest instant for `naive`, stepping forward in 15 minute increments
/// (up to a day) while the wall-clock time does not exist.
fn resolve_wall_clock<T>(
    naive: NaiveDateTime,
    resolve: impl Fn(&NaiveDateTime) -> LocalResult<T>,
) -> Option<T> {
    (0..=96)
        .filter_map(|step| naive.checked_add_signed(Duration::minutes(15 * step)))
        .find_map(|wall| resolve(&wall).earliest())
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// First and last dates of the month grid that contains `date`, padded out to
/// complete leading and trailing weeks.
pub fn month_grid_range(date: NaiveDate, first_day_of_week: u8) -> (NaiveDate, NaiveDate) {
    let month_start = date.with_day(1).unwrap_or(date);
    let month_end = month_start
        .with_day(last_day_of_month(month_start.year(), month_start.month()))
        .unwrap_or(month_start);

    let grid_start = get_week_start(month_start, first_day_of_week);
    let grid_end = get_week_start(month_end, first_day_of_week) + Duration::days(6);
    (grid_start, grid_end)
}

/// Move `current` by whole months, clamping the day to the target month's length.
pub fn shift_month_preserving_day(current: NaiveDate, delta_months: i32) -> NaiveDate {
    let total_months = (current.year() * 12) + (current.month() as i32 - 1) + delta_months;
    let new_year = total_months.div_euclid(12);
    let new_month = (total_months.rem_euclid(12) + 1) as u32;
    let day = current.day().min(last_day_of_month(new_year, new_month));

    NaiveDate::from_ymd_opt(new_year, new_month, day).unwrap_or(current)
}

pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Parse a user-supplied local date-time.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM` (optionally with seconds) and
/// full RFC 3339 timestamps.
pub fn parse_local_datetime(input: &str) -> Result<DateTime<Local>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Local));
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(to_local)
        .ok_or_else(|| {
            anyhow!(
                "Invalid date/time '{}'. Use YYYY-MM-DDTHH:MM (e.g. 2025-03-20T15:00)",
                input
            )
        })
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date '{}'. Use YYYY-MM-DD", input.trim()))
}

/// Parse a human duration such as `30m`, `2h` or `1h30m`.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let std_dur = humantime::parse_duration(input.trim())
        .map_err(|e| anyhow!("Invalid duration '{}': {}", input.trim(), e))?;
    let duration = Duration::from_std(std_dur).context("Duration too large")?;

    if duration <= Duration::zero() {
        bail!("Duration must be positive");
    }

    Ok(duration)
}
