// src/main.rs
use anyhow::{Context, Result};
use attendance_core::{
    aggregate::{self, Month},
    client::{self, AttendanceSource, HrApiClient, JsonDirSource},
    config::Config,
    export,
    server::{self, AppState},
    timezone::{self, IanaTimeZones},
    variance::GRACE_PERIOD_MINUTES,
};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const FALLBACK_TIMEZONE: &str = "America/Los_Angeles";

#[derive(Debug, Parser)]
#[command(name = "attendance-core", about = "Reconcile attendance punches against rostered shifts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the daily and monthly views over HTTP.
    Serve,
    /// Print the daily view as JSON or write it as CSV.
    Daily {
        /// YYYY-MM-DD, defaults to today in DEFAULT_TIMEZONE.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Read employees.json, roster.json and attendance.json from DIR instead of the HR API.
        #[arg(long, value_name = "DIR")]
        from_dir: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        /// Only print rows whose name or email contains this term.
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the monthly grid as JSON or write it as CSV.
    Monthly {
        /// YYYY-MM, defaults to the current month in DEFAULT_TIMEZONE.
        #[arg(long)]
        month: Option<Month>,
        #[arg(long, value_name = "DIR")]
        from_dir: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
}

/// Settings shared by the offline commands when no HR API is configured.
struct RunSettings {
    grace_period_minutes: i64,
    default_timezone: String,
}

impl RunSettings {
    fn resolve(config: Option<&Config>) -> Self {
        match config {
            Some(c) => Self {
                grace_period_minutes: c.grace_period_minutes,
                default_timezone: c.default_timezone.clone(),
            },
            None => Self {
                grace_period_minutes: GRACE_PERIOD_MINUTES,
                default_timezone: FALLBACK_TIMEZONE.to_string(),
            },
        }
    }

    fn today(&self) -> NaiveDate {
        timezone::local_date(&self.default_timezone, Utc::now())
    }
}

fn source_for(from_dir: Option<PathBuf>, config: Option<&Config>) -> Result<Arc<dyn AttendanceSource>> {
    match from_dir {
        Some(dir) => {
            info!("Reading attendance inputs from {}", dir.display());
            Ok(Arc::new(JsonDirSource::new(dir)))
        }
        None => {
            let config = config.context("HR_API_URL must be set unless --from-dir is given")?;
            let client = HrApiClient::from_config(config).context("Failed to build HR API client")?;
            Ok(Arc::new(client))
        }
    }
}

fn write_csv(path: &Path, body: &str) -> Result<()> {
    std::fs::write(path, body).with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

async fn run_serve() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration from environment")?;
    info!("Configuration loaded. HR API: {}", config.hr_api_url);

    let client = HrApiClient::from_config(&config).context("Failed to build HR API client")?;
    let state = AppState {
        source: Arc::new(client),
        converter: Arc::new(IanaTimeZones),
        grace_period_minutes: config.grace_period_minutes,
        default_timezone: config.default_timezone.clone(),
    };
    info!("Application state initialized.");

    let app = server::router(state);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}

async fn run_daily(
    date: Option<NaiveDate>,
    from_dir: Option<PathBuf>,
    csv: Option<PathBuf>,
    search: Option<String>,
) -> Result<()> {
    let config = Config::from_env().ok();
    let settings = RunSettings::resolve(config.as_ref());
    let source = source_for(from_dir, config.as_ref())?;
    let date = date.unwrap_or_else(|| settings.today());

    let inputs = client::load_daily_inputs(source.as_ref(), date)
        .await
        .with_context(|| format!("Failed to load attendance inputs for {}", date))?;
    let mut report = aggregate::build_daily_report(
        &inputs.employees,
        &inputs.attendance,
        &inputs.roster_week,
        date,
        settings.grace_period_minutes,
        &IanaTimeZones,
    );
    if let Some(term) = search.as_deref() {
        report.rows = aggregate::filter_rows(&report.rows, term).into_iter().cloned().collect();
    }

    match csv {
        Some(path) => write_csv(&path, &export::daily_csv(&report.rows)?),
        None => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

async fn run_monthly(month: Option<Month>, from_dir: Option<PathBuf>, csv: Option<PathBuf>) -> Result<()> {
    let config = Config::from_env().ok();
    let settings = RunSettings::resolve(config.as_ref());
    let source = source_for(from_dir, config.as_ref())?;
    let month = month.unwrap_or_else(|| Month::of(settings.today()));

    let inputs = client::load_monthly_inputs(source.as_ref(), month)
        .await
        .with_context(|| format!("Failed to load attendance inputs for {}", month))?;
    let report = aggregate::build_monthly_report(
        &inputs.employees,
        &inputs.rosters,
        &inputs.attendance,
        month,
        &IanaTimeZones,
    );

    match csv {
        Some(path) => write_csv(&path, &export::monthly_csv(month, &report.employees)?),
        None => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Setting tracing subscriber failed")?;

    let cli = Cli::parse();
    match cli.command {
        Command::Serve => run_serve().await,
        Command::Daily {
            date,
            from_dir,
            csv,
            search,
        } => run_daily(date, from_dir, csv, search).await,
        Command::Monthly { month, from_dir, csv } => run_monthly(month, from_dir, csv).await,
    }
}
