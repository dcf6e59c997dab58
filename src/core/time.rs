//! Time representation for media positions.
//! All positions and durations are milliseconds (i64), matching what the
//! underlying players report.

/// Time in milliseconds since the start of a media source
pub type Time = i64;

/// Time constants for conversions
pub mod constants {
    use super::Time;

    pub const MILLIS_PER_SECOND: Time = 1_000;
    pub const SECONDS_PER_MINUTE: Time = 60;
}

/// Time zero constant
pub const ZERO: Time = 0;

/// Convert seconds (f64) to milliseconds
#[inline]
pub fn from_seconds(seconds: f64) -> Time {
    (seconds * constants::MILLIS_PER_SECOND as f64).round() as Time
}

/// Convert milliseconds to seconds (f64)
#[inline]
pub fn to_seconds(millis: Time) -> f64 {
    millis as f64 / constants::MILLIS_PER_SECOND as f64
}

/// Clamp a requested position into `[0, duration]`.
///
/// Negative durations are treated as zero so a source that has not reported
/// metadata always clamps to the origin.
#[inline]
pub fn clamp_to_duration(target: Time, duration: Time) -> Time {
    target.max(ZERO).min(duration.max(ZERO))
}

/// Convert a slider ratio into an absolute position within `duration`.
/// Ratios outside `[0, 1]` are clamped; NaN maps to the origin.
pub fn ratio_to_position(ratio: f64, duration: Time) -> Time {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    clamp_to_duration((ratio * duration as f64).round() as Time, duration)
}

/// Format a position as `m:ss` for scrub-bar readouts.
pub fn format_clock(millis: Time) -> String {
    let total_seconds = millis.max(ZERO) / constants::MILLIS_PER_SECOND;
    let minutes = total_seconds / constants::SECONDS_PER_MINUTE;
    let seconds = total_seconds % constants::SECONDS_PER_MINUTE;

    format!("{}:{:02}", minutes, seconds)
}
