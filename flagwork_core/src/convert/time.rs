use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

/// The value type of time flags.
pub type Time = DateTime<FixedOffset>;

/// A layout that time flags try when converting their input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeLayout {
    /// Whole seconds since the unix epoch, for example `526`.
    UnixSeconds,
    /// RFC 3339, for example `2006-01-02T15:04:05Z`.
    Rfc3339,
    /// RFC 2822, for example `Mon, 02 Jan 2006 15:04:05 +0000`.
    Rfc2822,
    /// A `strftime` style pattern (see `chrono::format::strftime`).
    ///
    /// The pattern may describe a full timestamp, a date (taken at midnight UTC), or a clock time (taken on `0000-01-01`).
    /// Patterns without an offset are read as UTC.
    Format(String),
}

impl TimeLayout {
    /// Create a `strftime` style layout.
    pub fn format(pattern: impl Into<String>) -> Self {
        TimeLayout::Format(pattern.into())
    }

    pub(crate) fn parse(&self, input: &str) -> Option<Time> {
        match self {
            TimeLayout::UnixSeconds => {
                let seconds: i64 = input.parse().ok()?;
                DateTime::<Utc>::from_timestamp(seconds, 0).map(|time| time.fixed_offset())
            }
            TimeLayout::Rfc3339 => DateTime::parse_from_rfc3339(input).ok(),
            TimeLayout::Rfc2822 => DateTime::parse_from_rfc2822(input).ok(),
            TimeLayout::Format(pattern) => parse_pattern(input, pattern),
        }
    }
}

fn parse_pattern(input: &str, pattern: &str) -> Option<Time> {
    if let Ok(time) = DateTime::parse_from_str(input, pattern) {
        return Some(time);
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, pattern) {
        return Some(naive.and_utc().fixed_offset());
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, pattern) {
        let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
        return Some(date.and_time(midnight).and_utc().fixed_offset());
    }

    if let Ok(clock) = NaiveTime::parse_from_str(input, pattern) {
        let origin = NaiveDate::from_ymd_opt(0, 1, 1)?;
        return Some(origin.and_time(clock).and_utc().fixed_offset());
    }

    None
}

/// The layouts consulted, in order, when nothing else is configured.
pub(crate) fn default_layouts() -> Vec<TimeLayout> {
    vec![
        TimeLayout::UnixSeconds,
        TimeLayout::Rfc3339,
        TimeLayout::Rfc2822,
        TimeLayout::format("%Y-%m-%d %H:%M:%S"),
        TimeLayout::format("%Y-%m-%d"),
        // Kitchen clock, as in `3:04PM`.
        TimeLayout::format("%I:%M%p"),
        TimeLayout::format("%H:%M:%S"),
    ]
}

/// Midnight of January 1, year 1, in UTC.
///
/// The epoch is a legitimate value, so it can't double as "unset".
pub(crate) fn zero_time() -> Time {
    let midnight = NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("internal error - year 1 must be a valid date");
    DateTime::from_naive_utc_and_offset(midnight, Utc.fix())
}
