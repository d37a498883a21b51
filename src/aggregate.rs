// src/aggregate.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{AttendanceRecord, Employee, EmployeeAttendanceRange, RangeRoster, RosterWeekEntry};
use crate::roster::{self, ResolvedSchedule};
use crate::timezone::{format_local_time, TimeZoneConverter};
use crate::variance::{self, AttendanceStatus, Classification, VarianceFlags};

/// Placeholder for "no data" cells in the monthly grid.
pub const PLACEHOLDER: &str = "-";

// --- Attendance resolution ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordSource {
    Recorded,
    Synthesized,
}

/// An employee's attendance for one day: either the captured record or the
/// "not logged in yet" default.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    pub source: RecordSource,
    pub record: AttendanceRecord,
}

pub fn resolve_attendance(employee: &Employee, record: Option<&AttendanceRecord>) -> AttendanceRow {
    match record {
        Some(record) => AttendanceRow {
            source: RecordSource::Recorded,
            record: record.clone(),
        },
        None => AttendanceRow {
            source: RecordSource::Synthesized,
            record: AttendanceRecord {
                user_id: crate::model::AttendanceUserRef {
                    id: employee.user_id.id.clone(),
                    employee_id: employee.employee_id.clone(),
                    working_timezone: employee.working_timezone.clone(),
                },
                status: Some(variance::NOT_LOGGED_IN.to_string()),
                total_hours: Some(0.0),
                ..Default::default()
            },
        },
    }
}

// --- Daily view ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedAttendanceRow {
    pub employee_id: String,
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
    pub timezone: Option<String>,
    pub date: String,
    pub source: RecordSource,
    pub status: AttendanceStatus,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    /// Punches rendered as `HH:MM` in the working zone.
    pub check_in: String,
    pub check_out: String,
    pub total_hours: f64,
    #[serde(flatten)]
    pub schedule: ResolvedSchedule,
    #[serde(flatten)]
    pub flags: VarianceFlags,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub wfh: usize,
    pub half_day: usize,
}

impl AttendanceStats {
    pub fn from_rows(rows: &[EnhancedAttendanceRow]) -> Self {
        let mut stats = AttendanceStats {
            total: rows.len(),
            ..Default::default()
        };
        for row in rows {
            match row.status {
                AttendanceStatus::Present => stats.present += 1,
                AttendanceStatus::Absent => stats.absent += 1,
                AttendanceStatus::Late => stats.late += 1,
                AttendanceStatus::WorkFromHome => stats.wfh += 1,
                AttendanceStatus::HalfDay => stats.half_day += 1,
                _ => {}
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: String,
    pub rows: Vec<EnhancedAttendanceRow>,
    pub stats: AttendanceStats,
}

/// One row per employee for `date`, whether or not they have a record.
pub fn build_daily_rows(
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    roster_week: &[RosterWeekEntry],
    date: NaiveDate,
    grace_period_minutes: i64,
    converter: &dyn TimeZoneConverter,
) -> Vec<EnhancedAttendanceRow> {
    // Records without a user id can never be attributed to anyone.
    let by_user: HashMap<&str, &AttendanceRecord> = attendance
        .iter()
        .filter(|rec| !rec.user_id.id.is_empty())
        .map(|rec| (rec.user_id.id.as_str(), rec))
        .collect();
    let date_key = date.format("%Y-%m-%d").to_string();

    employees
        .iter()
        .map(|employee| {
            let record = Some(employee.user_id.id.as_str())
                .filter(|id| !id.is_empty())
                .and_then(|id| by_user.get(id).copied());
            let row = resolve_attendance(employee, record);
            let schedule = roster::resolve(&employee.id, date, roster_week);
            let timezone = employee.timezone();
            let Classification { flags, status, .. } =
                variance::classify(&schedule, Some(&row.record), timezone, grace_period_minutes, converter);
            debug!(
                "Daily row: employee={} scheduled={} status={}",
                employee.id, schedule.is_scheduled, status
            );

            EnhancedAttendanceRow {
                employee_id: employee.id.clone(),
                user_id: employee.user_id.id.clone(),
                name: employee.full_name(),
                email: employee.email().map(str::to_string),
                timezone: timezone.map(str::to_string),
                date: date_key.clone(),
                source: row.source,
                status,
                check_in: format_local_time(converter, row.record.clock_in.as_deref(), timezone),
                check_out: format_local_time(converter, row.record.clock_out.as_deref(), timezone),
                clock_in: row.record.clock_in,
                clock_out: row.record.clock_out,
                total_hours: row.record.total_hours.unwrap_or(0.0),
                schedule,
                flags,
            }
        })
        .collect()
}

pub fn build_daily_report(
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    roster_week: &[RosterWeekEntry],
    date: NaiveDate,
    grace_period_minutes: i64,
    converter: &dyn TimeZoneConverter,
) -> DailyReport {
    let rows = build_daily_rows(employees, attendance, roster_week, date, grace_period_minutes, converter);
    let stats = AttendanceStats::from_rows(&rows);
    info!(
        "Built daily attendance for {}: {} rows ({} present, {} late, {} absent)",
        date, stats.total, stats.present, stats.late, stats.absent
    );
    DailyReport {
        date: date.format("%Y-%m-%d").to_string(),
        rows,
        stats,
    }
}

/// Case-insensitive match on full name or email. An empty term keeps every row.
pub fn filter_rows<'a>(rows: &'a [EnhancedAttendanceRow], term: &str) -> Vec<&'a EnhancedAttendanceRow> {
    let needle = term.trim().to_lowercase();
    rows.iter()
        .filter(|row| {
            needle.is_empty()
                || row.name.to_lowercase().contains(&needle)
                || row
                    .email
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase().contains(&needle))
        })
        .collect()
}

// --- Monthly view ---

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid month '{0}', expected YYYY-MM")]
pub struct MonthParseError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Month { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Month { year: self.year + 1, month: 1 }
        } else {
            Month { year: self.year, month: self.month + 1 }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Month { year: self.year - 1, month: 12 }
        } else {
            Month { year: self.year, month: self.month - 1 }
        }
    }

    /// Every calendar day of the month, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let Some(first) = self.first_day() else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|d| d.month() == self.month)
            .collect()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days().last().copied()
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MonthParseError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(err)?;
        let year = year.parse::<i32>().map_err(|_| err())?;
        let month = month.parse::<u32>().map_err(|_| err())?;
        Month::new(year, month).ok_or_else(err)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Hours worked in a monthly cell; `Missing` renders as `"-"`, distinct
/// from a known zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursCell {
    Hours(Decimal),
    Missing,
}

impl HoursCell {
    pub fn value(&self) -> Decimal {
        match self {
            HoursCell::Hours(h) => *h,
            HoursCell::Missing => Decimal::ZERO,
        }
    }
}

impl fmt::Display for HoursCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoursCell::Hours(h) => write!(f, "{}", h.normalize()),
            HoursCell::Missing => f.write_str(PLACEHOLDER),
        }
    }
}

impl Serialize for HoursCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HoursCell::Hours(h) => serializer.serialize_f64(h.to_f64().unwrap_or_default()),
            HoursCell::Missing => serializer.serialize_str(PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCell {
    pub start_time: String,
    pub end_time: String,
    pub total_hours: HoursCell,
    pub status: String,
}

impl MonthlyCell {
    fn off() -> Self {
        MonthlyCell {
            start_time: roster::OFF.to_string(),
            end_time: roster::OFF.to_string(),
            total_hours: HoursCell::Hours(Decimal::ZERO),
            status: AttendanceStatus::Off.to_string(),
        }
    }

    fn missing() -> Self {
        MonthlyCell {
            start_time: PLACEHOLDER.to_string(),
            end_time: PLACEHOLDER.to_string(),
            total_hours: HoursCell::Missing,
            status: PLACEHOLDER.to_string(),
        }
    }

    pub fn is_off(&self) -> bool {
        self.status == AttendanceStatus::Off.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAttendanceData {
    pub employee_id: String,
    pub employee_name: String,
    pub title: String,
    /// Keyed by `YYYY-MM-DD`.
    pub monthly_data: BTreeMap<String, MonthlyCell>,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: String,
    pub days: Vec<String>,
    pub employees: Vec<MonthlyAttendanceData>,
}

fn hours_from(record: &AttendanceRecord) -> Decimal {
    record
        .total_hours
        .filter(|h| h.is_finite())
        .and_then(Decimal::from_f64)
        .unwrap_or(Decimal::ZERO)
}

fn recorded_cell(record: &AttendanceRecord, timezone: Option<&str>, converter: &dyn TimeZoneConverter) -> MonthlyCell {
    let render = |punch: Option<&str>| match punch.filter(|p| !p.trim().is_empty()) {
        Some(p) => format_local_time(converter, Some(p), timezone),
        None => PLACEHOLDER.to_string(),
    };
    // A captured day with no status reads as absent.
    let status = match record.status.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => AttendanceStatus::from_raw(Some(raw)),
        None => AttendanceStatus::Absent,
    };
    let status = match status {
        AttendanceStatus::Leave => record
            .notes
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| status.to_string()),
        other => other.to_string(),
    };
    MonthlyCell {
        start_time: render(record.clock_in.as_deref()),
        end_time: render(record.clock_out.as_deref()),
        total_hours: HoursCell::Hours(hours_from(record)),
        status,
    }
}

/// Per-employee grid for every day of `month` with a rounded monthly total.
pub fn build_monthly_grid(
    employees: &[Employee],
    rosters: &[RangeRoster],
    attendance: &[EmployeeAttendanceRange],
    month: Month,
    converter: &dyn TimeZoneConverter,
) -> Vec<MonthlyAttendanceData> {
    let days = month.days();

    employees
        .iter()
        .map(|employee| {
            let records = attendance.iter().find(|a| {
                let by_employee = !employee.id.is_empty() && a.user_id.employee_id.as_deref() == Some(employee.id.as_str());
                let by_user = !employee.user_id.id.is_empty() && a.user_id.id == employee.user_id.id;
                by_employee || by_user
            });
            let timezone = employee.timezone().or_else(|| {
                records.and_then(|r| r.user_id.working_timezone.as_deref().filter(|tz| !tz.is_empty()))
            });

            let mut monthly_data = BTreeMap::new();
            let mut total = Decimal::ZERO;
            for day in &days {
                let key = roster::range_key(*day);
                let cell = match records.and_then(|r| r.attendance.get(&key)) {
                    Some(record) => recorded_cell(record, timezone, converter),
                    None => match roster::range_slot(rosters, &employee.id, *day) {
                        Some(slot) if slot.is_off() => MonthlyCell::off(),
                        _ => MonthlyCell::missing(),
                    },
                };
                total += cell.total_hours.value();
                monthly_data.insert(day.format("%Y-%m-%d").to_string(), cell);
            }

            MonthlyAttendanceData {
                employee_id: employee.id.clone(),
                employee_name: employee.full_name(),
                title: employee.title(),
                monthly_data,
                monthly_total: total.round_dp(2),
            }
        })
        .collect()
}

pub fn build_monthly_report(
    employees: &[Employee],
    rosters: &[RangeRoster],
    attendance: &[EmployeeAttendanceRange],
    month: Month,
    converter: &dyn TimeZoneConverter,
) -> MonthlyReport {
    let grid = build_monthly_grid(employees, rosters, attendance, month, converter);
    info!("Built monthly attendance for {}: {} employees", month, grid.len());
    MonthlyReport {
        month: month.to_string(),
        days: month.days().iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
        employees: grid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttendanceUserRef, EmployeeRef, RosterSlot, UserProfile, WeekSchedule};
    use crate::timezone::IanaTimeZones;
    use rust_decimal_macros::dec;

    fn employee(id: &str, user: &str, first: &str, tz: &str) -> Employee {
        Employee {
            id: id.into(),
            user_id: UserProfile {
                id: user.into(),
                first_name: Some(first.into()),
                last_name: Some("Test".into()),
                email: Some(format!("{}@example.com", first.to_lowercase())),
                ..Default::default()
            },
            employee_id: None,
            working_timezone: Some(tz.into()),
            joining_date: None,
        }
    }

    #[test]
    fn month_parsing_and_navigation() {
        let m: Month = "2024-02".parse().unwrap();
        assert_eq!(m.days().len(), 29);
        assert_eq!("2023-02".parse::<Month>().unwrap().days().len(), 28);
        assert_eq!("2024-12".parse::<Month>().unwrap().next().to_string(), "2025-01");
        assert_eq!("2024-01".parse::<Month>().unwrap().previous().to_string(), "2023-12");
        assert!("2024-13".parse::<Month>().is_err());
        assert!("June".parse::<Month>().is_err());
        assert_eq!(m.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn synthesized_row_defaults() {
        let emp = employee("emp-1", "usr-1", "Ada", "UTC");
        let row = resolve_attendance(&emp, None);
        assert_eq!(row.source, RecordSource::Synthesized);
        assert_eq!(row.record.status.as_deref(), Some("Not logged in yet"));
        assert_eq!(row.record.total_hours, Some(0.0));
        assert_eq!(row.record.user_id.id, "usr-1");
    }

    #[test]
    fn daily_rows_reclassify_and_count() {
        let employees = vec![
            employee("emp-1", "usr-1", "Ada", "UTC"),
            employee("emp-2", "usr-2", "Grace", "UTC"),
            employee("emp-3", "usr-3", "Linus", "UTC"),
        ];
        let attendance = vec![AttendanceRecord {
            user_id: AttendanceUserRef { id: "usr-1".into(), ..Default::default() },
            status: Some("present".into()),
            clock_in: Some("2024-06-03T10:40:00Z".into()),
            total_hours: Some(7.5),
            ..Default::default()
        }];
        let roster = vec![
            RosterWeekEntry {
                employee: EmployeeRef { id: "emp-1".into() },
                schedule: WeekSchedule { monday: Some("Shift 10:00-18:00".into()), ..Default::default() },
            },
            RosterWeekEntry {
                employee: EmployeeRef { id: "emp-2".into() },
                schedule: WeekSchedule { monday: Some("Shift 10:00-18:00".into()), ..Default::default() },
            },
        ];
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let report = build_daily_report(&employees, &attendance, &roster, date, 15, &IanaTimeZones);

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].status, AttendanceStatus::Late);
        assert_eq!(report.rows[0].check_in, "10:40");
        assert_eq!(report.rows[0].check_out, "--");
        assert_eq!(report.rows[1].status, AttendanceStatus::Absent);
        assert_eq!(report.rows[1].source, RecordSource::Synthesized);
        assert_eq!(report.rows[2].status, AttendanceStatus::NotLoggedIn);
        assert!(!report.rows[2].schedule.is_scheduled);
        assert_eq!(
            report.stats,
            AttendanceStats { total: 3, present: 0, absent: 1, late: 1, wfh: 0, half_day: 0 }
        );
    }

    #[test]
    fn filter_matches_name_or_email() {
        let employees = vec![employee("emp-1", "usr-1", "Ada", "UTC"), employee("emp-2", "usr-2", "Grace", "UTC")];
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let rows = build_daily_rows(&employees, &[], &[], date, 15, &IanaTimeZones);
        assert_eq!(filter_rows(&rows, "GRACE").len(), 1);
        assert_eq!(filter_rows(&rows, "ada@").len(), 1);
        assert_eq!(filter_rows(&rows, "  ").len(), 2);
        assert!(filter_rows(&rows, "nobody").is_empty());
    }

    #[test]
    fn monthly_cells_cover_record_off_and_missing() {
        let emp = employee("emp-1", "usr-1", "Ada", "Asia/Dhaka");
        let mut records = HashMap::new();
        records.insert(
            "03/06/2024".to_string(),
            AttendanceRecord {
                status: Some("present".into()),
                clock_in: Some("2024-06-03T04:00:00Z".into()),
                clock_out: Some("2024-06-03T12:30:00Z".into()),
                total_hours: Some(8.5),
                ..Default::default()
            },
        );
        records.insert(
            "04/06/2024".to_string(),
            AttendanceRecord {
                status: Some("leave".into()),
                notes: Some("Sick leave".into()),
                ..Default::default()
            },
        );
        let attendance = vec![EmployeeAttendanceRange {
            user_id: AttendanceUserRef { id: "usr-1".into(), employee_id: Some("emp-1".into()), working_timezone: None },
            attendance: records,
        }];
        let mut slots = HashMap::new();
        slots.insert("07/06/2024".to_string(), RosterSlot { start_time: "OFF".into(), end_time: "OFF".into() });
        slots.insert("08/06/2024".to_string(), RosterSlot { start_time: "OFF".into(), end_time: "18:00".into() });
        let rosters = vec![RangeRoster { employee: EmployeeRef { id: "emp-1".into() }, roster: slots }];

        let grid = build_monthly_grid(&[emp], &rosters, &attendance, "2024-06".parse().unwrap(), &IanaTimeZones);
        let data = &grid[0];
        assert_eq!(data.monthly_data.len(), 30);

        let worked = &data.monthly_data["2024-06-03"];
        assert_eq!(worked.start_time, "10:00");
        assert_eq!(worked.end_time, "18:30");
        assert_eq!(worked.total_hours, HoursCell::Hours(dec!(8.5)));
        assert_eq!(worked.status, "present");

        let leave = &data.monthly_data["2024-06-04"];
        assert_eq!(leave.status, "Sick leave");
        assert_eq!(leave.start_time, "-");

        assert!(data.monthly_data["2024-06-07"].is_off());
        assert_eq!(data.monthly_data["2024-06-07"].total_hours, HoursCell::Hours(Decimal::ZERO));
        // Only one side OFF is not an off-day.
        assert_eq!(data.monthly_data["2024-06-08"].total_hours, HoursCell::Missing);
        assert_eq!(data.monthly_data["2024-06-10"].status, "-");

        assert_eq!(data.monthly_total, dec!(8.5));
    }

    #[test]
    fn missing_user_id_never_matches_stray_records() {
        let emp = Employee {
            id: "emp-9".into(),
            ..Default::default()
        };
        let stray = AttendanceRecord {
            status: Some("present".into()),
            clock_in: Some("2024-06-03T10:40:00Z".into()),
            total_hours: Some(9.0),
            ..Default::default()
        };
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let rows = build_daily_rows(&[emp.clone()], &[stray.clone()], &[], date, 15, &IanaTimeZones);
        assert_eq!(rows[0].source, RecordSource::Synthesized);
        assert_eq!(rows[0].status, AttendanceStatus::NotLoggedIn);
        assert_eq!(rows[0].total_hours, 0.0);
        assert_eq!(rows[0].check_in, "--");

        let mut records = HashMap::new();
        records.insert("03/06/2024".to_string(), stray);
        let attendance = vec![EmployeeAttendanceRange {
            user_id: AttendanceUserRef::default(),
            attendance: records,
        }];
        let grid = build_monthly_grid(&[emp], &[], &attendance, "2024-06".parse().unwrap(), &IanaTimeZones);
        assert_eq!(grid[0].monthly_total, Decimal::ZERO);
        assert_eq!(grid[0].monthly_data["2024-06-03"].total_hours, HoursCell::Missing);
    }

    #[test]
    fn recorded_day_without_status_is_absent() {
        let emp = employee("emp-1", "usr-1", "Ada", "UTC");
        let mut records = HashMap::new();
        records.insert(
            "03/06/2024".to_string(),
            AttendanceRecord {
                total_hours: Some(0.0),
                ..Default::default()
            },
        );
        records.insert(
            "04/06/2024".to_string(),
            AttendanceRecord {
                status: Some("  ".into()),
                ..Default::default()
            },
        );
        let attendance = vec![EmployeeAttendanceRange {
            user_id: AttendanceUserRef { id: "usr-1".into(), ..Default::default() },
            attendance: records,
        }];
        let grid = build_monthly_grid(&[emp], &[], &attendance, "2024-06".parse().unwrap(), &IanaTimeZones);
        assert_eq!(grid[0].monthly_data["2024-06-03"].status, "absent");
        assert_eq!(grid[0].monthly_data["2024-06-03"].total_hours, HoursCell::Hours(Decimal::ZERO));
        assert_eq!(grid[0].monthly_data["2024-06-04"].status, "absent");
    }

    #[test]
    fn hours_cell_serializes_placeholder_as_string() {
        assert_eq!(serde_json::to_string(&HoursCell::Missing).unwrap(), "\"-\"");
        assert_eq!(serde_json::to_string(&HoursCell::Hours(dec!(7.25))).unwrap(), "7.25");
        assert_eq!(HoursCell::Hours(dec!(8.50)).to_string(), "8.5");
    }
}
