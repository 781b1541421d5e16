use crate::error::{LocError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use std::time::Duration;

/// Resolve a `--until` value relative to `now`.
///
/// Accepts RFC3339, `YYYY-MM-DD` (midnight UTC), "N days/weeks/months ago"
/// and humantime durations such as `90d` or `2weeks`.
pub fn parse_cutoff(input: &str, now: DateTime<Utc>) -> Result<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime).fixed_offset());
        }
    }

    let duration = parse_natural_duration(input)
        .or_else(|| humantime::parse_duration(input).ok())
        .ok_or_else(|| LocError::InvalidDate(format!("Unrecognized cutoff '{input}'")))?;

    let delta = chrono::Duration::from_std(duration)
        .map_err(|_| LocError::InvalidDate(format!("Duration overflow for '{input}'")))?;
    now.checked_sub_signed(delta)
        .map(|t| t.fixed_offset())
        .ok_or_else(|| LocError::InvalidDate(format!("Duration overflow for '{input}'")))
}

/// "N days ago", "N weeks ago" or "N months ago" (30-day months).
/// Counts too large to represent yield `None`.
fn parse_natural_duration(input: &str) -> Option<Duration> {
    const UNITS: [(&str, u64); 3] = [
        (" days ago", 86_400),
        (" weeks ago", 7 * 86_400),
        (" months ago", 30 * 86_400),
    ];

    let input = input.trim().to_lowercase();
    UNITS.iter().find_map(|(suffix, secs)| {
        let n = input.strip_suffix(*suffix)?.trim().parse::<u64>().ok()?;
        n.checked_mul(*secs).map(Duration::from_secs)
    })
}

/// Truncate a string to `max` chars with an ellipsis when necessary.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
