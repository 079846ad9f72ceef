//! Timestamp formatting helpers.

/// Format seconds into an HH:MM:SS string, rounding to the nearest second.
///
/// # Examples
/// ```
/// use clipscout_models::timestamp::format_seconds;
/// assert_eq!(format_seconds(90.0), "00:01:30");
/// assert_eq!(format_seconds(3661.0), "01:01:01");
/// ```
pub fn format_seconds(total_secs: f64) -> String {
    let total = total_secs.max(0.0).round() as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
