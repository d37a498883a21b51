// src/variance.rs

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::model::AttendanceRecord;
use crate::roster::ResolvedSchedule;
use crate::timezone::TimeZoneConverter;

/// Tolerance around both ends of the scheduled window.
pub const GRACE_PERIOD_MINUTES: i64 = 15;

pub const NOT_LOGGED_IN: &str = "Not logged in yet";

// --- Status ---

/// Day status. Known API values get their own variant; anything else is
/// carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    WorkFromHome,
    HalfDay,
    Leave,
    Off,
    NotLoggedIn,
    Other(String),
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::WorkFromHome => "work-from-home",
            AttendanceStatus::HalfDay => "half-day",
            AttendanceStatus::Leave => "leave",
            AttendanceStatus::Off => "off",
            AttendanceStatus::NotLoggedIn => NOT_LOGGED_IN,
            AttendanceStatus::Other(s) => s,
        }
    }

    /// Human label used in tables and exports.
    pub fn label(&self) -> String {
        match self {
            AttendanceStatus::WorkFromHome => "Work from Home".to_string(),
            AttendanceStatus::HalfDay => "Half Day".to_string(),
            AttendanceStatus::NotLoggedIn => NOT_LOGGED_IN.to_string(),
            other => {
                let s = other.as_str();
                let mut chars = s.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }

    /// Raw status from a record, defaulting to "Not logged in yet" when
    /// absent or empty.
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.map(Self::from_label).unwrap_or(AttendanceStatus::NotLoggedIn)
    }

    // Only the exact API values are recognised; anything else is kept as sent.
    fn from_label(s: &str) -> Self {
        match s {
            "present" => AttendanceStatus::Present,
            "absent" => AttendanceStatus::Absent,
            "late" => AttendanceStatus::Late,
            "work-from-home" => AttendanceStatus::WorkFromHome,
            "half-day" => AttendanceStatus::HalfDay,
            "leave" => AttendanceStatus::Leave,
            "off" => AttendanceStatus::Off,
            "" | NOT_LOGGED_IN => AttendanceStatus::NotLoggedIn,
            other => AttendanceStatus::Other(other.to_string()),
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl From<String> for AttendanceStatus {
    fn from(s: String) -> Self {
        AttendanceStatus::from_raw(Some(&s))
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Classification ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarianceFlags {
    pub is_early_arrival: bool,
    pub is_late_arrival: bool,
    pub is_early_departure: bool,
    pub is_late_departure: bool,
}

impl VarianceFlags {
    pub fn any(&self) -> bool {
        self.is_early_arrival || self.is_late_arrival || self.is_early_departure || self.is_late_departure
    }

    /// Short notes for each raised flag, in a fixed order.
    pub fn notes(&self) -> Vec<&'static str> {
        let mut notes = Vec::new();
        if self.is_early_arrival {
            notes.push("Early Arrival");
        }
        if self.is_late_arrival {
            notes.push("Late Arrival");
        }
        if self.is_early_departure {
            notes.push("Early Departure");
        }
        if self.is_late_departure {
            notes.push("Late Departure");
        }
        notes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub is_scheduled: bool,
    #[serde(flatten)]
    pub flags: VarianceFlags,
    pub status: AttendanceStatus,
}

/// `HH:MM` to minutes since midnight; `0` for `OFF` or anything unparsable.
pub fn parse_time_to_minutes(time: &str) -> u32 {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map(|t| t.hour() * 60 + t.minute())
        .unwrap_or(0)
}

/// Compares punches against the resolved schedule.
///
/// Variance is only evaluated for scheduled days, so an unscheduled result
/// never carries a raised flag. A punch that cannot be localized still counts
/// as a punch for the status but is skipped for the early/late comparison.
pub fn classify(
    schedule: &ResolvedSchedule,
    record: Option<&AttendanceRecord>,
    timezone: Option<&str>,
    grace_period_minutes: i64,
    converter: &dyn TimeZoneConverter,
) -> Classification {
    let mut status = AttendanceStatus::from_raw(record.and_then(|r| r.status.as_deref()));

    if !schedule.is_scheduled {
        return Classification {
            is_scheduled: false,
            flags: VarianceFlags::default(),
            status,
        };
    }

    let scheduled_start = i64::from(parse_time_to_minutes(&schedule.start_time));
    let scheduled_end = i64::from(parse_time_to_minutes(&schedule.end_time));
    let clock_in = record
        .and_then(|r| r.clock_in.as_deref())
        .filter(|p| !p.trim().is_empty());
    let clock_out = record
        .and_then(|r| r.clock_out.as_deref())
        .filter(|p| !p.trim().is_empty());
    let local = |punch: &str| timezone.and_then(|tz| converter.to_local_minutes(punch, tz));

    let mut flags = VarianceFlags::default();

    if let Some(punch) = clock_in {
        if let Some(actual_in) = local(punch) {
            let delta = i64::from(actual_in) - scheduled_start;
            flags.is_early_arrival = delta < -grace_period_minutes;
            flags.is_late_arrival = delta > grace_period_minutes;
        } else {
            debug!("Clock-in '{}' could not be localized, skipping arrival variance", punch);
        }
        status = if flags.is_late_arrival {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };
    }

    if let Some(punch) = clock_out {
        if let Some(actual_out) = local(punch).map(i64::from) {
            flags.is_early_departure = actual_out < scheduled_end - grace_period_minutes;
            flags.is_late_departure = actual_out > scheduled_end + grace_period_minutes;
        } else {
            debug!("Clock-out '{}' could not be localized, skipping departure variance", punch);
        }
    }

    if clock_in.is_none()
        && clock_out.is_none()
        && matches!(status, AttendanceStatus::NotLoggedIn | AttendanceStatus::Absent)
    {
        status = AttendanceStatus::Absent;
    }

    Classification {
        is_scheduled: true,
        flags,
        status,
    }
}
