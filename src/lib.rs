// src/lib.rs
//
// Attendance reconciliation: normalizes punches into each employee's working
// zone, resolves rostered shifts, classifies variance and aggregates daily
// and monthly views.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod export;
pub mod model;
pub mod roster;
pub mod server;
pub mod timezone;
pub mod variance;

mod reconciliation_tests;

pub use aggregate::{
    build_daily_report, build_daily_rows, build_monthly_grid, build_monthly_report, filter_rows,
    resolve_attendance, AttendanceStats, DailyReport, EnhancedAttendanceRow, Month, MonthlyAttendanceData,
    MonthlyReport,
};
pub use client::{AttendanceSource, HrApiClient, JsonDirSource, StaticSource};
pub use config::Config;
pub use timezone::{format_local_time, utc_to_local_minutes, IanaTimeZones, TimeZoneConverter};
pub use variance::{classify, AttendanceStatus, VarianceFlags};
