//! Display formatting for durations, timestamps, and sizes.

use chrono::{DateTime, Utc};

/// Formats a millisecond duration as `1h 2m 3s`, omitting leading zero units.
///
/// Durations below one second are shown in milliseconds.
pub(crate) fn format_duration(duration_ms: u64) -> String {
    if duration_ms < 1_000 {
        return format!("{duration_ms}ms");
    }

    let total_seconds = duration_ms.div_euclid(1_000);
    let hours = total_seconds.div_euclid(3_600);
    let minutes = total_seconds.rem_euclid(3_600).div_euclid(60);
    let seconds = total_seconds.rem_euclid(60);

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Formats a run start time as `dd/mm/YYYY HH:MM` in UTC.
pub(crate) fn format_start_time(start_time: &DateTime<Utc>) -> String {
    start_time.format("%d/%m/%Y %H:%M").to_string()
}

/// Formats a byte count with a binary unit.
pub(crate) fn format_size(bytes: usize) -> String {
    const KIB: usize = 1_024;
    const MIB: usize = KIB * KIB;

    if bytes >= MIB {
        with_tenths(bytes, MIB, "MiB")
    } else if bytes >= KIB {
        with_tenths(bytes, KIB, "KiB")
    } else {
        format!("{bytes} B")
    }
}

fn with_tenths(bytes: usize, unit: usize, label: &str) -> String {
    let whole = bytes.div_euclid(unit);
    let tenths = bytes.rem_euclid(unit).saturating_mul(10).div_euclid(unit);
    format!("{whole}.{tenths} {label}")
}
