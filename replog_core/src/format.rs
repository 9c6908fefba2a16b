//! Display formatting helpers for durations and timestamps.

use chrono::{DateTime, Local, Utc};

/// Human duration: `0s`, `45s`, `5m 30s`, `1h 12m`
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".into();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        if secs > 0 {
            format!("{}m {}s", minutes, secs)
        } else {
            format!("{}m", minutes)
        }
    } else {
        format!("{}s", secs)
    }
}

/// Countdown clock: `m:ss` (rest timer display)
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Short local date: `Mon, Jan 15`
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%a, %b %-d")
        .to_string()
}

/// Local date and time: `Mon, Jan 15 - 9:41 AM`
pub fn format_date_time(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%a, %b %-d - %-I:%M %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(330), "5m 30s");
        assert_eq!(format_duration(4320), "1h 12m");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(90), "1:30");
        assert_eq!(format_clock(605), "10:05");
    }

    #[test]
    fn test_format_date_is_nonempty() {
        let s = format_date(Utc::now());
        assert!(!s.is_empty());
        assert!(s.contains(','));
    }
}
