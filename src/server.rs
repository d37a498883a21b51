// src/server.rs

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode as AxumStatusCode;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::aggregate::{self, DailyReport, Month, MonthParseError, MonthlyReport};
use crate::client::{load_daily_inputs, load_monthly_inputs, ApiError, AttendanceSource};
use crate::export::{self, ExportError};
use crate::timezone::{self, TimeZoneConverter};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Month(#[from] MonthParseError),
    #[error("HR API client error")]
    Api(#[from] ApiError),
    #[error("CSV export failed")]
    Export(#[from] ExportError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Error occurred: {:?}", self);
        let (status_code, error_message) = match &self {
            AppError::BadRequest(msg) => (AxumStatusCode::BAD_REQUEST, msg.clone()),
            AppError::Month(e) => (AxumStatusCode::BAD_REQUEST, e.to_string()),
            AppError::Api(api_err) => match api_err {
                ApiError::Unauthorized => (
                    AxumStatusCode::BAD_GATEWAY,
                    "HR API rejected the configured credentials.".to_string(),
                ),
                ApiError::Api { status, message } => {
                    error!("HR API Error: Status={}, Msg={}", status, message);
                    (
                        AxumStatusCode::BAD_GATEWAY,
                        "An error occurred while communicating with the HR API.".to_string(),
                    )
                }
                ApiError::Request(_) => (
                    AxumStatusCode::BAD_GATEWAY,
                    "Failed to connect to the HR API.".to_string(),
                ),
                ApiError::Json(_) => (
                    AxumStatusCode::BAD_GATEWAY,
                    "HR API returned data in an unexpected shape.".to_string(),
                ),
                ApiError::Io { .. } | ApiError::UrlParse(_) | ApiError::Config(_) => (
                    AxumStatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error (data source).".to_string(),
                ),
            },
            AppError::Export(_) => (
                AxumStatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error (CSV export).".to_string(),
            ),
        };
        (status_code, Json(json!({ "error": error_message }))).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn AttendanceSource>,
    pub converter: Arc<dyn TimeZoneConverter + Send + Sync>,
    pub grace_period_minutes: i64,
    pub default_timezone: String,
}

impl AppState {
    fn today(&self) -> NaiveDate {
        timezone::local_date(&self.default_timezone, Utc::now())
    }

    fn resolve_date(&self, raw: Option<&str>) -> Result<NaiveDate, AppError> {
        match raw.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", raw))),
            None => Ok(self.today()),
        }
    }

    fn resolve_month(&self, raw: Option<&str>) -> Result<Month, AppError> {
        match raw.map(str::trim).filter(|m| !m.is_empty()) {
            Some(raw) => Ok(raw.parse::<Month>()?),
            None => Ok(Month::of(self.today())),
        }
    }

    async fn daily_report(&self, date: NaiveDate) -> Result<DailyReport, AppError> {
        let inputs = load_daily_inputs(self.source.as_ref(), date).await?;
        Ok(aggregate::build_daily_report(
            &inputs.employees,
            &inputs.attendance,
            &inputs.roster_week,
            date,
            self.grace_period_minutes,
            self.converter.as_ref(),
        ))
    }

    async fn monthly_report(&self, month: Month) -> Result<MonthlyReport, AppError> {
        let inputs = load_monthly_inputs(self.source.as_ref(), month).await?;
        Ok(aggregate::build_monthly_report(
            &inputs.employees,
            &inputs.rosters,
            &inputs.attendance,
            month,
            self.converter.as_ref(),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct DailyParams {
    pub date: Option<String>,
    /// Name/email filter; stats still cover every employee.
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyParams {
    pub month: Option<String>,
}

fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        body,
    )
        .into_response()
}

async fn handle_status() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339(),
    }))
}

async fn handle_daily(
    State(state): State<AppState>,
    Query(params): Query<DailyParams>,
) -> Result<Json<DailyReport>, AppError> {
    let date = state.resolve_date(params.date.as_deref())?;
    info!("Handling daily attendance request for {}", date);
    let mut report = state.daily_report(date).await?;
    if let Some(term) = params.search.as_deref().filter(|t| !t.trim().is_empty()) {
        report.rows = aggregate::filter_rows(&report.rows, term).into_iter().cloned().collect();
    }
    Ok(Json(report))
}

async fn handle_daily_export(
    State(state): State<AppState>,
    Query(params): Query<DailyParams>,
) -> Result<Response, AppError> {
    let date = state.resolve_date(params.date.as_deref())?;
    let report = state.daily_report(date).await?;
    if report.rows.is_empty() {
        warn!("Daily export for {} has no rows", date);
    }
    let body = export::daily_csv(&report.rows)?;
    Ok(csv_response(&export::daily_filename(&report.date), body))
}

async fn handle_monthly(
    State(state): State<AppState>,
    Query(params): Query<MonthlyParams>,
) -> Result<Json<MonthlyReport>, AppError> {
    let month = state.resolve_month(params.month.as_deref())?;
    info!("Handling monthly attendance request for {}", month);
    Ok(Json(state.monthly_report(month).await?))
}

async fn handle_monthly_export(
    State(state): State<AppState>,
    Query(params): Query<MonthlyParams>,
) -> Result<Response, AppError> {
    let month = state.resolve_month(params.month.as_deref())?;
    let report = state.monthly_report(month).await?;
    let body = export::monthly_csv(month, &report.employees)?;
    Ok(csv_response(&export::monthly_filename(month), body))
}

pub fn router(state: AppState) -> Router {
    let attendance_routes = Router::new()
        .route("/daily", get(handle_daily))
        .route("/daily/export", get(handle_daily_export))
        .route("/monthly", get(handle_monthly))
        .route("/monthly/export", get(handle_monthly_export));
    let api_routes = Router::new().nest("/attendance", attendance_routes);
    Router::new()
        .nest("/api", api_routes)
        .route("/status", get(handle_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
