//! HUD text formatting
//!
//! Plain strings for the overlay and platform captions; drawing is the
//! host page's job.

use crate::sim::Platform;

/// `MM:SS` (minutes keep growing past 59)
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Integer with `,` thousands separators
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `HH:MM` (UTC) of a Unix timestamp in seconds
pub fn format_block_time(timestamp_secs: i64) -> String {
    let day_secs = timestamp_secs.rem_euclid(86_400);
    format!("{:02}:{:02}", day_secs / 3600, (day_secs % 3600) / 60)
}

/// Caption lines drawn under a platform
pub fn platform_caption(platform: &Platform) -> [String; 2] {
    let gas = platform.block.gas_used_value().unwrap_or(0);
    let time = platform
        .block
        .timestamp_secs()
        .map_or_else(|| "--:--".to_string(), format_block_time);
    [format!("Gas: {}", format_thousands(gas)), format!("Time: {}", time)]
}
