//! CLI entry point for the HR survey dashboard.
//!
//! Provides subcommands for rendering per-sheet performance reports,
//! listing sheets and subjects, and snapshotting the remote spreadsheet
//! to local CSV files for offline use.

mod infra;

use crate::infra::gsheets::client::{GoogleSheetsClient, SheetCredentials};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hr_dash::auth;
use hr_dash::cache::CachedLoader;
use hr_dash::filter::{self, RowFilter};
use hr_dash::normalize::clean;
use hr_dash::report::{build_report, render_text};
use hr_dash::sheets::{SheetKind, SheetSet};
use hr_dash::source::{CsvDirSource, SheetSource, write_sheet};
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "hr_dash")]
#[command(about = "Employee-evaluation survey reports from a shared spreadsheet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the report for one sheet under the active filters
    Report {
        /// Sheet to report on (PRODUCTION, ADMINISTRATIVE, COMMERCIAL, CLIMATE)
        #[arg(short, long, default_value = "PRODUCTION")]
        sheet: String,

        /// Inclusive start date, YYYY-MM-DD
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Inclusive end date, YYYY-MM-DD
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Subject (COLABORADOR) to restrict to; "All" disables the filter
        #[arg(long, default_value = "All")]
        subject: String,

        /// Read sheets from a CSV snapshot directory instead of the remote spreadsheet
        #[arg(long)]
        from_snapshot: Option<String>,

        /// Also write the report as JSON to this path
        #[arg(long)]
        json: Option<String>,

        /// Shared access password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Show load status and row counts for all four sheets
    ListSheets {
        #[arg(long)]
        from_snapshot: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },
    /// List the distinct subjects appearing on a sheet
    ListSubjects {
        #[arg(short, long, default_value = "PRODUCTION")]
        sheet: String,

        #[arg(long)]
        from_snapshot: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },
    /// Fetch all sheets and write them to a local CSV snapshot directory
    Snapshot {
        /// Directory to write <TAB>.csv files into
        #[arg(short, long, default_value = "snapshots")]
        output_dir: String,

        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/hr_dash.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("hr_dash.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            sheet,
            start_date,
            end_date,
            subject,
            from_snapshot,
            json,
            password,
        } => {
            gate(password)?;
            let kind: SheetKind = sheet.parse()?;
            let set = load_sheets(from_snapshot.as_deref()).await?;
            run_report(&set, kind, start_date, end_date, subject, json.as_deref())?;
        }
        Commands::ListSheets {
            from_snapshot,
            password,
        } => {
            gate(password)?;
            let set = load_sheets(from_snapshot.as_deref()).await?;

            for kind in SheetKind::all() {
                match set.table(kind) {
                    Some(table) => {
                        info!(sheet = %kind, rows = table.row_count(), "Sheet loaded");
                    }
                    None => {
                        let message = set
                            .error_for(kind)
                            .map(|e| e.message.clone())
                            .unwrap_or_default();
                        error!(sheet = %kind, error = %message, "Sheet failed to load");
                    }
                }
            }

            info!(
                loaded = set.tables.len(),
                failed = set.errors.len(),
                "Sheet load summary"
            );
        }
        Commands::ListSubjects {
            sheet,
            from_snapshot,
            password,
        } => {
            gate(password)?;
            let kind: SheetKind = sheet.parse()?;
            let set = load_sheets(from_snapshot.as_deref()).await?;

            let Some(raw) = set.table(kind) else {
                report_load_failure(&set, kind);
                return Ok(());
            };

            let table = clean(raw);
            let subjects = filter::subjects(&table);
            info!(sheet = %kind, count = subjects.len(), "Subjects found");
            for subject in subjects {
                println!("{subject}");
            }
        }
        Commands::Snapshot {
            output_dir,
            password,
        } => {
            gate(password)?;
            let set = load_sheets(None).await?;

            let dir = Path::new(&output_dir);
            let mut written = 0usize;
            for kind in SheetKind::all() {
                match set.table(kind) {
                    Some(table) => {
                        write_sheet(dir, kind, table)?;
                        written += 1;
                    }
                    None => {
                        warn!(sheet = %kind, "Skipping failed sheet in snapshot");
                    }
                }
            }

            info!(written, dir = %output_dir, "Snapshot complete");
        }
    }

    Ok(())
}

/// Verifies the shared access password, prompting on stdin when no flag
/// was supplied.
fn gate(password: Option<String>) -> Result<()> {
    let supplied = match password {
        Some(p) => p,
        None => {
            eprint!("Password: ");
            std::io::stderr().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    auth::require_password(&supplied)
}

/// Loads all sheets from the snapshot directory when given, otherwise from
/// the remote spreadsheet through the time-bounded cache.
async fn load_sheets(from_snapshot: Option<&str>) -> Result<SheetSet> {
    let source: Box<dyn SheetSource> = match from_snapshot {
        Some(dir) => Box::new(CsvDirSource::new(dir)),
        None => {
            let spreadsheet_id =
                std::env::var("GSHEET_ID").context("GSHEET_ID must be set")?;
            let credentials_path = std::env::var("GOOGLE_CREDENTIALS_FILE")
                .context("GOOGLE_CREDENTIALS_FILE must be set")?;
            let credentials = SheetCredentials::load(&credentials_path)?;
            Box::new(GoogleSheetsClient::connect(&credentials, spreadsheet_id).await?)
        }
    };

    let loader = CachedLoader::new(source);
    Ok(loader.load().await)
}

fn report_load_failure(set: &SheetSet, kind: SheetKind) {
    let message = set
        .error_for(kind)
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "sheet was not loaded".to_string());
    error!(sheet = %kind, error = %message, "Cannot report on this sheet");
    println!("Sheet {kind} could not be loaded: {message}");
}

fn run_report(
    set: &SheetSet,
    kind: SheetKind,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    subject: String,
    json_path: Option<&str>,
) -> Result<()> {
    let Some(raw) = set.table(kind) else {
        report_load_failure(set, kind);
        return Ok(());
    };

    let table = clean(raw);

    if let Some((min, max)) = filter::date_bounds(&table) {
        info!(sheet = %kind, min = %min, max = %max, "Observed date range");
    }

    let filtered = RowFilter::new(start_date, end_date, Some(subject)).apply(&table);
    let report = build_report(kind, &filtered);

    print!("{}", render_text(&report));

    if let Some(path) = json_path {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("cannot write report to '{path}'"))?;
        info!(path, "JSON report written");
    }

    Ok(())
}
