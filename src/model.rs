// src/model.rs
//
// Wire types for the three collections handed to the engine by the HR API.
// Timestamps stay as raw strings so a single malformed punch never fails a
// whole payload; they are parsed lazily by the timezone module.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- Employees ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<NamedRef>,
    #[serde(default)]
    pub role: Option<NamedRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: UserProfile,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub working_timezone: Option<String>,
    #[serde(default)]
    pub joining_date: Option<String>,
}

impl Employee {
    /// "First Last", trimmed; "Unknown" when neither part is present.
    pub fn full_name(&self) -> String {
        let first = self.user_id.first_name.as_deref().unwrap_or_default();
        let last = self.user_id.last_name.as_deref().unwrap_or_default();
        let name = format!("{} {}", first, last).trim().to_string();
        if name.is_empty() {
            "Unknown".to_string()
        } else {
            name
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.user_id.email.as_deref().filter(|e| !e.is_empty())
    }

    /// Working zone, ignoring blank values sent by the API.
    pub fn timezone(&self) -> Option<&str> {
        self.working_timezone
            .as_deref()
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
    }

    /// Role display name, then department name, then a generic title.
    pub fn title(&self) -> String {
        self.user_id
            .role
            .as_ref()
            .and_then(|r| r.display_name.clone().filter(|n| !n.is_empty()))
            .or_else(|| {
                self.user_id
                    .department
                    .as_ref()
                    .map(|d| d.name.clone())
                    .filter(|n| !n.is_empty())
            })
            .unwrap_or_else(|| "Employee".to_string())
    }
}

// --- Attendance ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUserRef {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub working_timezone: Option<String>,
}

/// One punch-capture record per employee per calendar date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default)]
    pub user_id: AttendanceUserRef,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub clock_in: Option<String>,
    #[serde(default)]
    pub clock_out: Option<String>,
    #[serde(default)]
    pub total_hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendance {
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

/// Range view: one entry per employee, records keyed by `DD/MM/YYYY`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttendanceRange {
    #[serde(default)]
    pub user_id: AttendanceUserRef,
    #[serde(default)]
    pub attendance: HashMap<String, AttendanceRecord>,
}

// --- Rosters ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmployeeRef {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Free-form schedule strings for one ISO week.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeekSchedule {
    #[serde(default)]
    pub sunday: Option<String>,
    #[serde(default)]
    pub monday: Option<String>,
    #[serde(default)]
    pub tuesday: Option<String>,
    #[serde(default)]
    pub wednesday: Option<String>,
    #[serde(default)]
    pub thursday: Option<String>,
    #[serde(default)]
    pub friday: Option<String>,
    #[serde(default)]
    pub saturday: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RosterWeekEntry {
    pub employee: EmployeeRef,
    #[serde(default)]
    pub schedule: WeekSchedule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RosterSlot {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

/// Range view: one entry per employee, slots keyed by `DD/MM/YYYY`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RangeRoster {
    pub employee: EmployeeRef,
    #[serde(default)]
    pub roster: HashMap<String, RosterSlot>,
}

/// Standard `{ "data": ... }` wrapper used by every HR API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}
