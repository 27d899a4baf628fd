//! Fixed date-time formatting for sample timestamps.
//!
//! Timestamps are rendered with the layout `yyyy-MM-dd'T'HH:mm:ss[XXX]`: ASCII digits, whole
//! seconds, and an ISO-8601 offset that collapses to `Z` only when it is exactly zero. Offset
//! seconds are dropped.

use chrono::{DateTime, FixedOffset, Local, Offset, SubsecRound, TimeZone};
use std::fmt::Display;

/// Layout of every formatted sample timestamp.
pub const DATE_TIME_PATTERN: &str = "yyyy-MM-dd'T'HH:mm:ss[XXX]";

/// Format `moment` with [`DATE_TIME_PATTERN`].
pub fn format_date_time<Tz>(moment: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let offset_seconds = moment.offset().fix().local_minus_utc();
    format!(
        "{}{}",
        moment.format("%Y-%m-%dT%H:%M:%S"),
        format_offset(offset_seconds)
    )
}

/// `moment` reduced to what [`DATE_TIME_PATTERN`] shows: whole seconds, and an offset
/// without its seconds. The wall-clock fields are kept.
pub fn to_pattern_precision(moment: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let offset_seconds = moment.offset().local_minus_utc();
    let offset = FixedOffset::east_opt(offset_seconds - offset_seconds % 60)
        .unwrap_or(*moment.offset());
    let local = moment.naive_local().trunc_subsecs(0);

    offset
        .from_local_datetime(&local)
        .single()
        .unwrap_or_else(|| moment.trunc_subsecs(0))
}

/// The current wall-clock moment in the local time zone.
pub fn now() -> DateTime<FixedOffset> {
    let now = Local::now();
    now.with_timezone(now.offset())
}

fn format_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let total_minutes = offset_seconds.unsigned_abs() / 60;
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);

    if offset_seconds == 0 {
        "Z".to_string()
    } else {
        format!("{sign}{hours:02}:{minutes:02}")
    }
}
