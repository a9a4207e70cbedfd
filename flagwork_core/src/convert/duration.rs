use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Parse a compound duration literal, such as `300ms`, `1.5h` or `2h45m`.
///
/// Negative durations (other than negative zero) are rejected, since they have no `Duration`.
pub(crate) fn parse_duration(input: &str) -> Result<Duration, String> {
    let nanos = go_parse_duration::parse_duration(input)
        .map_err(|error| format!("invalid duration {input:?}: {error:?}"))?;
    let nanos = u64::try_from(nanos)
        .map_err(|_| format!("negative duration {input:?} is not supported"))?;
    Ok(Duration::from_nanos(nanos))
}

/// Render a duration in the same compound form accepted by `parse_duration`.
///
/// Durations under a second use the largest fitting sub-second unit (`1.5ms`), longer ones are
/// broken into hours, minutes and (fractional) seconds (`1h0m0s`, `8m46s`).
pub(crate) fn format_duration(duration: &Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }

    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", decimal(nanos, NANOS_PER_MICRO));
    }

    if nanos < NANOS_PER_SECOND {
        return format!("{}ms", decimal(nanos, NANOS_PER_MILLI));
    }

    let hours = nanos / NANOS_PER_HOUR;
    let minutes = (nanos / NANOS_PER_MINUTE) % 60;
    let seconds = decimal(nanos % NANOS_PER_MINUTE, NANOS_PER_SECOND);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;

    if fraction == 0 {
        whole.to_string()
    } else {
        let width = unit.to_string().len() - 1;
        let digits = format!("{fraction:0width$}");
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}
