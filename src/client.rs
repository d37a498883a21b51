// src/client.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::aggregate::Month;
use crate::config::Config;
use crate::model::{
    ApiEnvelope, AttendanceRecord, DailyAttendance, Employee, EmployeeAttendanceRange, RangeRoster,
    RosterWeekEntry,
};
use crate::roster;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed")]
    Request(#[from] reqwest::Error),

    #[error("JSON processing error")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error")]
    UrlParse(#[from] url::ParseError),

    #[error("File I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    #[error("HR API rejected the credentials (Status 401)")]
    Unauthorized,

    #[error("HR API error: Status={status}, Message='{message}'")]
    Api { status: StatusCode, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error body shape returned by the HR API on failure.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
}

// --- Source abstraction ---

/// The three collections the engine needs, fetched independently.
#[async_trait]
pub trait AttendanceSource: Send + Sync {
    async fn employees(&self) -> Result<Vec<Employee>, ApiError>;

    async fn daily_attendance(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ApiError>;

    async fn roster_week(&self, iso_year: i32, iso_week: u32) -> Result<Vec<RosterWeekEntry>, ApiError>;

    async fn roster_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RangeRoster>, ApiError>;

    async fn attendance_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmployeeAttendanceRange>, ApiError>;
}

#[derive(Debug, Clone, Default)]
pub struct DailyInputs {
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub roster_week: Vec<RosterWeekEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct MonthlyInputs {
    pub employees: Vec<Employee>,
    pub rosters: Vec<RangeRoster>,
    pub attendance: Vec<EmployeeAttendanceRange>,
}

/// Fetches everything the daily view needs; fails as a whole if any fetch fails.
pub async fn load_daily_inputs(source: &dyn AttendanceSource, date: NaiveDate) -> Result<DailyInputs, ApiError> {
    let (iso_year, iso_week) = roster::iso_week_of(date);
    info!("Loading daily inputs for {} (ISO week {}-W{:02})", date, iso_year, iso_week);
    let (employees, attendance, roster_week) = tokio::try_join!(
        source.employees(),
        source.daily_attendance(date),
        source.roster_week(iso_year, iso_week),
    )?;
    Ok(DailyInputs {
        employees,
        attendance,
        roster_week,
    })
}

pub async fn load_monthly_inputs(source: &dyn AttendanceSource, month: Month) -> Result<MonthlyInputs, ApiError> {
    let (Some(start), Some(end)) = (month.first_day(), month.last_day()) else {
        return Err(ApiError::Config(format!("Invalid month {}", month)));
    };
    info!("Loading monthly inputs for {} ({} to {})", month, start, end);
    let (employees, rosters, attendance) = tokio::try_join!(
        source.employees(),
        source.roster_range(start, end),
        source.attendance_range(start, end),
    )?;
    Ok(MonthlyInputs {
        employees,
        rosters,
        attendance,
    })
}

// --- HR API client ---

#[derive(Debug, Clone)]
pub struct HrApiClient {
    base_url: Url,
    token: Option<String>,
    http_client: Client,
}

fn date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl HrApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("HR API URL '{}' cannot be a base", base_url)));
        }
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            token: token.filter(|t| !t.is_empty()),
            http_client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.hr_api_url, config.hr_api_token.clone(), config.request_timeout())
    }

    /// Appends path segments (percent-encoded) and query pairs to the base URL.
    pub fn endpoint_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("HR API URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, context_msg: &str) -> Result<T, ApiError> {
        debug!("Sending request for '{}' to URL: {}", context_msg, url);
        let mut request = self.http_client.get(url.clone()).header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let resp = request.send().await.map_err(|e| {
            error!("HTTP request for '{}' (URL: {}) failed: {}", context_msg, url, e);
            ApiError::Request(e)
        })?;
        let status = resp.status();
        info!("Received response for '{}': Status={}", context_msg, status);

        if status.is_success() {
            let bytes = resp.bytes().await?;
            let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes).map_err(|e| {
                error!("JSON deserialization failed for '{}' (URL: {}): {}", context_msg, url, e);
                ApiError::Json(e)
            })?;
            return Ok(envelope.data);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        let body = resp
            .text()
            .await
            .unwrap_or_else(|e| format!("Failed to read error body: {}", e));
        error!("HR API Error Response: Status={}, Body='{}' for URL: {}", status, body, url);
        Err(ApiError::Api {
            status,
            message: error_message(&body),
        })
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|p| p.message)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl AttendanceSource for HrApiClient {
    async fn employees(&self) -> Result<Vec<Employee>, ApiError> {
        let url = self.endpoint_url(&["employees"], &[("isActive", "true")])?;
        self.get(url, "active employees").await
    }

    async fn daily_attendance(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ApiError> {
        let date = date_param(date);
        let url = self.endpoint_url(&["attendance", "date", date.as_str()], &[])?;
        let daily: DailyAttendance = self.get(url, "daily attendance").await?;
        Ok(daily.attendance)
    }

    async fn roster_week(&self, iso_year: i32, iso_week: u32) -> Result<Vec<RosterWeekEntry>, ApiError> {
        let (year, week) = (iso_year.to_string(), iso_week.to_string());
        let url = self.endpoint_url(&["roster", "week", year.as_str(), week.as_str()], &[])?;
        self.get(url, "weekly roster").await
    }

    async fn roster_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RangeRoster>, ApiError> {
        let (start, end) = (date_param(start), date_param(end));
        let url = self.endpoint_url(
            &["roster", "rosterforallemployee", "all"],
            &[("startDate", start.as_str()), ("endDate", end.as_str())],
        )?;
        self.get(url, "roster range").await
    }

    async fn attendance_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmployeeAttendanceRange>, ApiError> {
        let (start, end) = (date_param(start), date_param(end));
        let url = self.endpoint_url(
            &["attendance", "get-attendance-by-date-range", "all"],
            &[("startDate", start.as_str()), ("endDate", end.as_str())],
        )?;
        self.get(url, "attendance range").await
    }
}

// --- Fixture sources ---

/// Records whose `date` falls on `date`; undated records are kept.
fn records_on(records: &[AttendanceRecord], date: NaiveDate) -> Vec<AttendanceRecord> {
    let key = date_param(date);
    records
        .iter()
        .filter(|r| r.date.as_deref().map_or(true, |d| d.starts_with(&key)))
        .cloned()
        .collect()
}

/// In-memory collections, used by tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub roster_week: Vec<RosterWeekEntry>,
    pub rosters: Vec<RangeRoster>,
    pub attendance_range: Vec<EmployeeAttendanceRange>,
}

#[async_trait]
impl AttendanceSource for StaticSource {
    async fn employees(&self) -> Result<Vec<Employee>, ApiError> {
        Ok(self.employees.clone())
    }

    async fn daily_attendance(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ApiError> {
        Ok(records_on(&self.attendance, date))
    }

    async fn roster_week(&self, _iso_year: i32, _iso_week: u32) -> Result<Vec<RosterWeekEntry>, ApiError> {
        Ok(self.roster_week.clone())
    }

    async fn roster_range(&self, _start: NaiveDate, _end: NaiveDate) -> Result<Vec<RangeRoster>, ApiError> {
        Ok(self.rosters.clone())
    }

    async fn attendance_range(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<EmployeeAttendanceRange>, ApiError> {
        Ok(self.attendance_range.clone())
    }
}

/// Accepts either a raw payload or one still wrapped in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Enveloped(ApiEnvelope<T>),
    Bare(T),
}

impl<T> Payload<T> {
    fn into_inner(self) -> T {
        match self {
            Payload::Enveloped(envelope) => envelope.data,
            Payload::Bare(data) => data,
        }
    }
}

fn parse_payload<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str::<Payload<T>>(raw).map(Payload::into_inner)
}

/// Reads `employees.json`, `roster.json` and `attendance.json` from a
/// directory. The roster and attendance files hold the weekly/daily shapes
/// for the daily view and the range shapes for the monthly view.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub const EMPLOYEES_FILE: &'static str = "employees.json";
    pub const ROSTER_FILE: &'static str = "roster.json";
    pub const ATTENDANCE_FILE: &'static str = "attendance.json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<T, ApiError> {
        let path = self.dir.join(file);
        debug!("Reading fixture {:?}", path);
        let raw = tokio::fs::read_to_string(&path).await.map_err(|source| ApiError::Io {
            source,
            context: format!("Failed to read {:?}", path),
        })?;
        Ok(parse_payload(&raw)?)
    }
}

#[async_trait]
impl AttendanceSource for JsonDirSource {
    async fn employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.read(Self::EMPLOYEES_FILE).await
    }

    async fn daily_attendance(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ApiError> {
        let daily: DailyAttendance = self.read(Self::ATTENDANCE_FILE).await?;
        Ok(records_on(&daily.attendance, date))
    }

    async fn roster_week(&self, _iso_year: i32, _iso_week: u32) -> Result<Vec<RosterWeekEntry>, ApiError> {
        self.read(Self::ROSTER_FILE).await
    }

    async fn roster_range(&self, _start: NaiveDate, _end: NaiveDate) -> Result<Vec<RangeRoster>, ApiError> {
        self.read(Self::ROSTER_FILE).await
    }

    async fn attendance_range(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<EmployeeAttendanceRange>, ApiError> {
        self.read(Self::ATTENDANCE_FILE).await
    }
}
