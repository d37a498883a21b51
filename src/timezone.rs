// src/timezone.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

/// Placeholder rendered when a punch or zone is missing.
pub const MISSING_TIME: &str = "--";

/// Localizes absolute punch timestamps. Injected so the engine stays a pure
/// function of its inputs and tests never depend on the wall clock.
pub trait TimeZoneConverter {
    /// Minutes since local midnight in `zone`, `None` when either input is unusable.
    fn to_local_minutes(&self, instant: &str, zone: &str) -> Option<u32>;

    /// `HH:MM` (24-hour) in `zone`, `None` when either input is unusable.
    fn format(&self, instant: &str, zone: &str) -> Option<String>;
}

/// Converter backed by the IANA database shipped with `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaTimeZones;

impl TimeZoneConverter for IanaTimeZones {
    fn to_local_minutes(&self, instant: &str, zone: &str) -> Option<u32> {
        let local = parse_instant(instant)?.with_timezone(&parse_zone(zone)?);
        Some(local.hour() * 60 + local.minute())
    }

    fn format(&self, instant: &str, zone: &str) -> Option<String> {
        let local = parse_instant(instant)?.with_timezone(&parse_zone(zone)?);
        Some(local.format("%H:%M").to_string())
    }
}

pub fn parse_zone(zone: &str) -> Option<Tz> {
    match zone.trim().parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            warn!("Unknown IANA time zone '{}'", zone);
            None
        }
    }
}

/// Accepts RFC 3339 or an offset-less ISO timestamp, which is read as UTC.
pub fn parse_instant(instant: &str) -> Option<DateTime<Utc>> {
    let trimmed = instant.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.and_utc());
        }
    }
    debug!("Unparsable punch timestamp '{}'", instant);
    None
}

/// Calendar date of `now` in `zone`; an unknown zone falls back to UTC.
pub fn local_date(zone: &str, now: DateTime<Utc>) -> NaiveDate {
    match parse_zone(zone) {
        Some(tz) => now.with_timezone(&tz).date_naive(),
        None => now.date_naive(),
    }
}

/// [`local_date`] as `YYYY-MM-DD`.
pub fn local_date_string(zone: &str, now: DateTime<Utc>) -> String {
    local_date(zone, now).format("%Y-%m-%d").to_string()
}

/// Minutes since local midnight, or `0` when unavailable.
///
/// `0` here does not mean midnight: callers that compare against a schedule
/// should use [`TimeZoneConverter::to_local_minutes`] and branch on `None`.
pub fn utc_to_local_minutes(
    converter: &dyn TimeZoneConverter,
    instant: Option<&str>,
    zone: Option<&str>,
) -> u32 {
    match (instant, zone) {
        (Some(instant), Some(zone)) => converter.to_local_minutes(instant, zone).unwrap_or(0),
        _ => 0,
    }
}

/// `HH:MM` in `zone`, `"--"` when either argument is absent, or the raw input
/// when zone-aware formatting fails.
pub fn format_local_time(
    converter: &dyn TimeZoneConverter,
    instant: Option<&str>,
    zone: Option<&str>,
) -> String {
    let (Some(instant), Some(zone)) = (
        instant.filter(|s| !s.trim().is_empty()),
        zone.filter(|s| !s.trim().is_empty()),
    ) else {
        return MISSING_TIME.to_string();
    };
    converter
        .format(instant, zone)
        .unwrap_or_else(|| instant.to_string())
}
