// src/export.rs

use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;
use tracing::debug;

use crate::aggregate::{EnhancedAttendanceRow, Month, MonthlyAttendanceData, MonthlyCell, PLACEHOLDER};

pub const ON_TIME: &str = "On Time";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer could not be finalised: {0}")]
    Buffer(String),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub const DAILY_HEADER: [&str; 12] = [
    "Employee Name",
    "Email",
    "Status",
    "Scheduled Start",
    "Scheduled End",
    "Check In",
    "Check Out",
    "Hours",
    "Has Schedule",
    "Variance",
    "Timezone",
    "Date",
];

/// `"; "`-joined variance notes, or "On Time" when no flag is raised.
pub fn variance_text(row: &EnhancedAttendanceRow) -> String {
    let notes = row.flags.notes();
    if notes.is_empty() {
        ON_TIME.to_string()
    } else {
        notes.join("; ")
    }
}

fn write_all<I, R>(records: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    for record in records {
        writer.write_record(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Daily table as CSV, every field quoted.
pub fn daily_csv(rows: &[EnhancedAttendanceRow]) -> Result<String, ExportError> {
    let header = std::iter::once(DAILY_HEADER.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    let body = rows.iter().map(|row| {
        vec![
            row.name.clone(),
            row.email.clone().unwrap_or_default(),
            row.status.label(),
            row.schedule.start_time.clone(),
            row.schedule.end_time.clone(),
            row.check_in.clone(),
            row.check_out.clone(),
            row.total_hours.to_string(),
            if row.schedule.is_scheduled { "Yes" } else { "No" }.to_string(),
            variance_text(row),
            row.timezone.clone().unwrap_or_default(),
            row.date.clone(),
        ]
    });
    debug!("Writing daily CSV with {} rows", rows.len());
    write_all(header.chain(body))
}

fn monthly_cell_text(cell: Option<&MonthlyCell>) -> String {
    match cell {
        Some(cell) if cell.is_off() => "off".to_string(),
        Some(cell) if cell.start_time != PLACEHOLDER => {
            format!("{}-{} ({}h)", cell.start_time, cell.end_time, cell.total_hours)
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Monthly grid as CSV: one column per day (`01`..`NN`) plus a total.
pub fn monthly_csv(month: Month, data: &[MonthlyAttendanceData]) -> Result<String, ExportError> {
    let days = month.days();
    let mut header = vec!["Employee".to_string(), "Title".to_string(), "Month".to_string()];
    header.extend(days.iter().map(|d| d.format("%d").to_string()));
    header.push("Monthly Total".to_string());

    let month_label = month.to_string();
    let body = data.iter().map(|employee| {
        let mut record = vec![employee.employee_name.clone(), employee.title.clone(), month_label.clone()];
        record.extend(days.iter().map(|d| {
            monthly_cell_text(employee.monthly_data.get(&d.format("%Y-%m-%d").to_string()))
        }));
        record.push(employee.monthly_total.to_string());
        record
    });
    debug!("Writing monthly CSV for {} with {} employees", month, data.len());
    write_all(std::iter::once(header).chain(body))
}

pub fn daily_filename(date: &str) -> String {
    format!("attendance-{}.csv", date)
}

pub fn monthly_filename(month: Month) -> String {
    format!("monthly-attendance-{}.csv", month)
}
