use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};

use crate::error::WheelError;

/// Accepts RFC 3339 and offset-less ISO 8601 timestamps (read as UTC).
pub fn parse_reset_instant(raw: &str) -> Result<DateTime<Utc>, WheelError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(WheelError::ResetTimestamp(raw.to_string()))
}

pub fn format_hms(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTick {
    pub text: String,
    pub finished: bool,
}

/// Time left until the daily reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    end: DateTime<Utc>,
}

impl Countdown {
    pub fn new(end: DateTime<Utc>) -> Self {
        Self { end }
    }

    pub fn parse(raw: &str) -> Result<Self, WheelError> {
        parse_reset_instant(raw).map(Self::new)
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.end - now).max(Duration::zero())
    }

    pub fn tick(&self, now: DateTime<Utc>) -> CountdownTick {
        let remaining = self.remaining(now);
        CountdownTick {
            text: format_hms(remaining),
            finished: remaining <= Duration::zero(),
        }
    }
}
