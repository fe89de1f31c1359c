use std::time::Duration;

use chrono::{NaiveTime, Timelike};

const DAY_SECS: u64 = 24 * 3600;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid time format, please use hh:mm")]
pub struct InvalidTime;

pub fn parse_time(input: &str) -> Result<NaiveTime, InvalidTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| InvalidTime)
}

/// Time from `now` until the next `alarm`. An alarm at or before the current
/// second rolls over to tomorrow.
pub fn wait_until(alarm: NaiveTime, now: NaiveTime) -> Duration {
    let now_secs = u64::from(now.num_seconds_from_midnight());
    let mut alarm_secs = u64::from(alarm.hour() * 3600 + alarm.minute() * 60);
    if alarm_secs <= now_secs {
        alarm_secs += DAY_SECS;
    }
    Duration::from_secs(alarm_secs - now_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("07:30"), Ok(t(7, 30, 0)));
        assert_eq!(parse_time(" 23:59 "), Ok(t(23, 59, 0)));
        assert_eq!(parse_time("25:00"), Err(InvalidTime));
        assert_eq!(parse_time("noon"), Err(InvalidTime));
    }

    #[test]
    fn test_wait_later_today() {
        assert_eq!(wait_until(t(10, 0, 0), t(9, 30, 15)), Duration::from_secs(1785));
    }

    #[test]
    fn test_wait_rolls_over_to_tomorrow() {
        assert_eq!(wait_until(t(8, 0, 0), t(9, 0, 0)), Duration::from_secs(23 * 3600));
        // same minute, already past second zero
        assert_eq!(wait_until(t(9, 0, 0), t(9, 0, 10)), Duration::from_secs(DAY_SECS - 10));
        assert_eq!(wait_until(t(9, 0, 0), t(9, 0, 0)), Duration::from_secs(DAY_SECS));
    }
}
