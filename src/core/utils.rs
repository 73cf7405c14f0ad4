// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

/// Wall-clock now, in ms since the Unix epoch.
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0));
    d.as_millis() as u64
}

pub fn ms_to_local(ms: u64) -> Option<DateTime<Local>> {
    let ms = i64::try_from(ms).ok()?;
    Local.timestamp_millis_opt(ms).single()
}

/// Instants before the Unix epoch clamp to zero.
pub fn local_to_ms(dt: &DateTime<Local>) -> u64 {
    u64::try_from(dt.timestamp_millis()).unwrap_or(0)
}

pub fn format_duration(dur: Duration) -> String {
    let secs = dur.as_secs();

    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        let minutes = secs / 60;
        let seconds = secs % 60;
        format!("{}m {}s", minutes, seconds)
    } else {
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        format!("{}h {}m", hours, minutes)
    }
}

/// Parses `90`, `90s`, `5m`, `1h`, `1h30m` style durations.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let s = raw.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total: u64 = 0;
    let mut digits = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(format!("invalid duration '{raw}'")),
        };

        let n: u64 = digits
            .parse()
            .map_err(|_| format!("invalid duration '{raw}'"))?;
        digits.clear();

        total = n
            .checked_mul(unit)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| format!("duration '{raw}' is too large"))?;
    }

    if !digits.is_empty() {
        return Err(format!("missing unit in duration '{raw}'"));
    }

    Ok(Duration::from_secs(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_accepts_units() {
        assert_eq!(parse_duration("90"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("45s"), Ok(Duration::from_secs(45)));
        assert_eq!(parse_duration("5m"), Ok(Duration::from_secs(300)));
        assert_eq!(parse_duration(" 1H30m "), Ok(Duration::from_secs(5400)));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("5x").is_err());
        assert!(parse_duration("1h30").is_err());
        assert!(parse_duration("m").is_err());
    }

    #[test]
    fn format_duration_buckets() {
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3720)), "1h 2m");
    }

    #[test]
    fn local_ms_conversion_round_trips() {
        let dt = ms_to_local(1_700_000_000_123).unwrap();
        assert_eq!(local_to_ms(&dt), 1_700_000_000_123);
    }
}
