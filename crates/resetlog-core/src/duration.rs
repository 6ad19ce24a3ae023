//! Short duration strings for the leading cell of each row.

use std::fmt::Write as _;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

/// Format `seconds` as `1d2h3m4s`, omitting leading units that are zero.
///
/// Durations shorter than `ms_max_seconds` also show milliseconds
/// (`4.250s`). Negative and non-finite inputs format as `0s`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time_short(seconds: f64, ms_max_seconds: Option<f64>) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let whole = seconds.floor() as u64;

    let mut out = String::new();
    if whole >= SECONDS_PER_DAY {
        let _ = write!(out, "{}d", whole / SECONDS_PER_DAY);
    }
    if whole >= SECONDS_PER_HOUR {
        let _ = write!(out, "{}h", (whole / SECONDS_PER_HOUR) % 24);
    }
    if whole >= SECONDS_PER_MINUTE {
        let _ = write!(out, "{}m", (whole / SECONDS_PER_MINUTE) % 60);
    }
    let _ = write!(out, "{}", whole % SECONDS_PER_MINUTE);
    if ms_max_seconds.is_some_and(|max| seconds < max) {
        let millis = (seconds.fract() * 1000.0).floor() as u64;
        let _ = write!(out, ".{millis:03}");
    }
    out.push('s');
    out
}
