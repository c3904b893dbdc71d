//! Duration labels used by the timer and report views.

/// `HH:MM:SS` for a live timer.
pub fn clock(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// `1h 05m` from an hour up, otherwise `45m 30s`, `45m` or `40s`.
pub fn hours_minutes(minutes: u64, seconds_remainder: u8) -> String {
    let total = minutes * 60 + u64::from(seconds_remainder);
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    match (hours, mins, secs) {
        (0, 0, s) => format!("{s}s"),
        (0, m, 0) => format!("{m}m"),
        (0, m, s) => format!("{m}m {s}s"),
        (h, m, _) => format!("{h}h {m:02}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_every_field() {
        assert_eq!(clock(0), "00:00:00");
        assert_eq!(clock(3725), "01:02:05");
    }

    #[test]
    fn hours_minutes_labels() {
        assert_eq!(hours_minutes(45, 30), "45m 30s");
        assert_eq!(hours_minutes(45, 0), "45m");
        assert_eq!(hours_minutes(65, 0), "1h 05m");
        assert_eq!(hours_minutes(59, 59), "59m 59s");
        assert_eq!(hours_minutes(0, 40), "40s");
        assert_eq!(hours_minutes(0, 0), "0s");
    }
}
