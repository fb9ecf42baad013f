use crate::types::DirectoryEntry;
use chrono::{DateTime, Local, TimeDelta, Timelike};

/// Rounds to the nearest microsecond, ties to even, carrying into the
/// seconds when the fraction rounds up to a whole second.
fn round_to_micros(ts: &DateTime<Local>) -> DateTime<Local> {
    let nanos = ts.nanosecond();
    let mut micros = i64::from(nanos / 1_000);
    let rem = nanos % 1_000;
    if rem > 500 || (rem == 500 && micros % 2 == 1) {
        micros += 1;
    }
    *ts - TimeDelta::nanoseconds(i64::from(nanos)) + TimeDelta::microseconds(micros)
}

/// Renders a local timestamp as `YYYY-MM-DD HH:MM:SS`, with a six digit
/// microsecond fraction appended only when it is non-zero.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    let ts = round_to_micros(ts);
    let base = ts.format("%Y-%m-%d %H:%M:%S").to_string();
    let micros = ts.nanosecond() % 1_000_000_000 / 1_000;
    if micros == 0 {
        base
    } else {
        format!("{base}.{micros:06}")
    }
}

/// One report line, without the trailing newline.
#[must_use]
pub fn format_line(entry: &DirectoryEntry) -> String {
    match &entry.last_modified {
        Some(ts) => format!(
            "{} - {} bytes - Last Modified: {}",
            entry.relative_name,
            entry.size_bytes,
            format_timestamp(ts)
        ),
        None => format!("{} - {} bytes", entry.relative_name, entry.size_bytes),
    }
}
