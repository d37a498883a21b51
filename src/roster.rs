// src/roster.rs

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{RangeRoster, RosterSlot, RosterWeekEntry, WeekSchedule};

/// Shown for start/end when an employee has no schedule.
pub const UNSCHEDULED_TIME: &str = "--";
pub const OFF: &str = "OFF";

// `<label>? <time> - <time>`; whitespace around the hyphen is optional and
// each time may carry an AM/PM suffix.
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2}:\d{2})\s*([ap]m)?\s*-\s*(\d{1,2}:\d{2})\s*([ap]m)?")
        .expect("roster range pattern is valid")
});

static CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2}:\d{2})\s*([ap]m)?$").expect("roster clock pattern is valid"));

/// A single roster cell after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterDayEntry {
    Off,
    Unscheduled,
    Range { start: NaiveTime, end: NaiveTime },
    /// Single clock time; start and end coincide.
    Fixed { time: NaiveTime },
    /// Single non-time token such as an on-call marker, shown verbatim.
    Label { text: String },
}

impl RosterDayEntry {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "---" || trimmed == "-" {
            return RosterDayEntry::Unscheduled;
        }
        if trimmed.eq_ignore_ascii_case(OFF) {
            return RosterDayEntry::Off;
        }
        if !trimmed.contains('-') {
            let fixed = CLOCK_RE
                .captures(trimmed)
                .and_then(|caps| parse_clock(&caps[1], caps.get(2).map(|m| m.as_str())));
            return match fixed {
                Some(time) => RosterDayEntry::Fixed { time },
                None => RosterDayEntry::Label {
                    text: trimmed.to_string(),
                },
            };
        }

        let parsed = RANGE_RE.captures(trimmed).and_then(|caps| {
            let start = parse_clock(&caps[1], caps.get(2).map(|m| m.as_str()))?;
            let end = parse_clock(&caps[3], caps.get(4).map(|m| m.as_str()))?;
            Some(RosterDayEntry::Range { start, end })
        });
        match parsed {
            Some(entry) => entry,
            None => {
                warn!("Unrecognised roster range '{}', treating as unscheduled", raw);
                RosterDayEntry::Unscheduled
            }
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(
            self,
            RosterDayEntry::Range { .. } | RosterDayEntry::Fixed { .. } | RosterDayEntry::Label { .. }
        )
    }
}

fn parse_clock(hm: &str, meridiem: Option<&str>) -> Option<NaiveTime> {
    match meridiem {
        Some(m) => NaiveTime::parse_from_str(&format!("{} {}", hm, m.to_uppercase()), "%I:%M %p").ok(),
        None => NaiveTime::parse_from_str(hm, "%H:%M").ok(),
    }
}

/// Expected working window for one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSchedule {
    pub start_time: String,
    pub end_time: String,
    pub is_scheduled: bool,
}

impl ResolvedSchedule {
    pub fn unscheduled() -> Self {
        Self {
            start_time: UNSCHEDULED_TIME.to_string(),
            end_time: UNSCHEDULED_TIME.to_string(),
            is_scheduled: false,
        }
    }
}

impl From<&RosterDayEntry> for ResolvedSchedule {
    fn from(entry: &RosterDayEntry) -> Self {
        match entry {
            RosterDayEntry::Range { start, end } => ResolvedSchedule {
                start_time: start.format("%H:%M").to_string(),
                end_time: end.format("%H:%M").to_string(),
                is_scheduled: true,
            },
            RosterDayEntry::Fixed { time } => ResolvedSchedule {
                start_time: time.format("%H:%M").to_string(),
                end_time: time.format("%H:%M").to_string(),
                is_scheduled: true,
            },
            RosterDayEntry::Label { text } => ResolvedSchedule {
                start_time: text.clone(),
                end_time: text.clone(),
                is_scheduled: true,
            },
            RosterDayEntry::Off | RosterDayEntry::Unscheduled => ResolvedSchedule::unscheduled(),
        }
    }
}

impl WeekSchedule {
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&str> {
        let slot = match weekday {
            Weekday::Sun => &self.sunday,
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
        };
        slot.as_deref()
    }
}

/// Looks up `employee_key` in the weekly roster and resolves the day of `date`.
/// An empty key never matches.
pub fn resolve(employee_key: &str, date: NaiveDate, roster_week: &[RosterWeekEntry]) -> ResolvedSchedule {
    let entry = roster_week
        .iter()
        .find(|r| !employee_key.is_empty() && r.employee.id == employee_key);
    let Some(entry) = entry else {
        debug!("No roster entry for employee {}", employee_key);
        return ResolvedSchedule::unscheduled();
    };
    let raw = entry.schedule.for_weekday(date.weekday()).unwrap_or_default();
    ResolvedSchedule::from(&RosterDayEntry::parse(raw))
}

/// ISO (year, week) addressing the weekly roster that contains `date`.
pub fn iso_week_of(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

/// `YYYY-MM-DD` iteration keys are stored as `DD/MM/YYYY` in range payloads.
pub fn range_key(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

impl RosterSlot {
    pub fn is_off(&self) -> bool {
        self.start_time.trim().eq_ignore_ascii_case(OFF) && self.end_time.trim().eq_ignore_ascii_case(OFF)
    }
}

/// Roster slot for `employee_key` on `date` from the range-shaped roster.
pub fn range_slot<'a>(
    rosters: &'a [RangeRoster],
    employee_key: &str,
    date: NaiveDate,
) -> Option<&'a RosterSlot> {
    rosters
        .iter()
        .find(|r| !employee_key.is_empty() && r.employee.id == employee_key)
        .and_then(|r| r.roster.get(&range_key(date)))
}
