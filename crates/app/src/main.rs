use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, Clock, EXPORT_FILE_NAME, ProgressTracker, StudySessionService, ThemeService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracker_core::progress::ProgressReport;
use tracker_core::syllabus::Syllabus;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingPath { command: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingPath { command } => write!(f, "{command} requires a file path"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    export_dir: PathBuf,
    notes_dir: PathBuf,
}

impl UiApp for DesktopApp {
    fn syllabus(&self) -> Arc<Syllabus> {
        self.services.syllabus()
    }

    fn tracker(&self) -> Arc<ProgressTracker> {
        self.services.tracker()
    }

    fn themes(&self) -> Arc<ThemeService> {
        self.services.themes()
    }

    fn study_sessions(&self) -> Arc<StudySessionService> {
        self.services.study_sessions()
    }

    fn export_dir(&self) -> PathBuf {
        self.export_dir.clone()
    }

    fn notes_dir(&self) -> PathBuf {
        self.notes_dir.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [ui]            [options]");
    eprintln!("  cargo run -p app -- status          [options]");
    eprintln!("  cargo run -p app -- export [--out <path>] [options]");
    eprintln!("  cargo run -p app -- import <path>   [options]");
    eprintln!("  cargo run -p app -- reset           [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>      default sqlite://checklist.sqlite3");
    eprintln!("  --syllabus <path>      syllabus JSON, default built-in");
    eprintln!("  --export-dir <dir>     where exports land, default current directory");
    eprintln!("  --notes-dir <dir>      base for unit PDF notes, default syllabus directory");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CHECKLIST_DB_URL, CHECKLIST_SYLLABUS, CHECKLIST_EXPORT_DIR,");
    eprintln!("  CHECKLIST_NOTES_DIR, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Ui,
    Status,
    Export { out: Option<PathBuf> },
    Import { path: PathBuf },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    db_url: String,
    syllabus: Option<PathBuf>,
    export_dir: PathBuf,
    notes_dir: Option<PathBuf>,
}

impl Args {
    /// Where unit note paths resolve: the explicit directory, else the
    /// syllabus file's directory, else the working directory. Always absolute.
    fn resolved_notes_dir(&self) -> PathBuf {
        let dir = self
            .notes_dir
            .clone()
            .or_else(|| {
                self.syllabus
                    .as_deref()
                    .and_then(Path::parent)
                    .map(Path::to_path_buf)
            })
            .unwrap_or_else(|| PathBuf::from("."));
        if dir.is_absolute() {
            dir
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(dir)
        }
    }

    fn from_env() -> Self {
        Self {
            db_url: normalize_sqlite_url(
                std::env::var("CHECKLIST_DB_URL").unwrap_or_else(|_| "checklist.sqlite3".into()),
            ),
            syllabus: std::env::var_os("CHECKLIST_SYLLABUS").map(PathBuf::from),
            export_dir: std::env::var_os("CHECKLIST_EXPORT_DIR")
                .map_or_else(|| PathBuf::from("."), PathBuf::from),
            notes_dir: std::env::var_os("CHECKLIST_NOTES_DIR").map(PathBuf::from),
        }
    }
}

/// Split argv into a subcommand and its options. A missing subcommand, or
/// one that starts with `--`, means `ui`.
fn parse_command(argv: Vec<String>, mut args: Args) -> Result<(Command, Args), ArgsError> {
    let mut iter = argv.into_iter().peekable();
    let name = match iter.peek() {
        Some(first) if !first.starts_with("--") => iter.next(),
        _ => None,
    };

    let mut out = None;
    let mut positional = None;
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(&mut iter, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                args.db_url = normalize_sqlite_url(value);
            }
            "--syllabus" => args.syllabus = Some(require_value(&mut iter, "--syllabus")?.into()),
            "--export-dir" => {
                args.export_dir = require_value(&mut iter, "--export-dir")?.into();
            }
            "--notes-dir" => {
                args.notes_dir = Some(require_value(&mut iter, "--notes-dir")?.into());
            }
            "--out" if name.as_deref() == Some("export") => {
                out = Some(PathBuf::from(require_value(&mut iter, "--out")?));
            }
            _ if name.as_deref() == Some("import")
                && positional.is_none()
                && !arg.starts_with("--") =>
            {
                positional = Some(PathBuf::from(arg));
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    let command = match name.as_deref() {
        None | Some("ui") => Command::Ui,
        Some("status") => Command::Status,
        Some("export") => Command::Export { out },
        Some("import") => Command::Import {
            path: positional.ok_or(ArgsError::MissingPath { command: "import" })?,
        },
        Some("reset") => Command::Reset,
        Some(other) => return Err(ArgsError::UnknownArg(other.to_string())),
    };
    Ok((command, args))
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn load_syllabus(path: Option<&Path>) -> Result<Syllabus, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            Ok(Syllabus::from_json_bytes(&bytes)?)
        }
        None => Ok(Syllabus::builtin()?),
    }
}

fn status_text(syllabus: &Syllabus, report: &ProgressReport) -> String {
    let overall = report.overall;
    let mut text = format!(
        "{}: {}/{} topics ({}%)\n",
        syllabus.title(),
        overall.completed,
        overall.total,
        overall.percentage
    );
    for unit in syllabus.units() {
        let snapshot = report.unit(unit.id());
        text.push_str(&format!(
            "  {:<40} {:>3}%  ({}/{})\n",
            unit.title(),
            snapshot.percentage,
            snapshot.completed,
            snapshot.total
        ));
    }
    text.push_str(report.message());
    text
}

async fn export_to(tracker: &ProgressTracker, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = tracker.export()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

async fn import_from(
    tracker: &ProgressTracker,
    path: &Path,
) -> Result<ProgressReport, Box<dyn std::error::Error>> {
    let bytes = tokio::fs::read(path).await?;
    Ok(tracker.import(&bytes).await?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    if matches!(argv.first().map(String::as_str), Some("--help" | "-h")) {
        print_usage();
        return Ok(());
    }

    let (command, args) = parse_command(argv, Args::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let syllabus = load_syllabus(args.syllabus.as_deref())?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url, Clock::default(), syllabus).await?;
    let tracker = services.tracker();

    match command {
        Command::Ui => {
            let stored = services
                .study_sessions()
                .record_session(tracker.report().overall)
                .await;
            info!(
                percentage = stored.value.progress.percentage,
                persisted = stored.persistence.is_persisted(),
                "study session recorded"
            );

            let title = format!("{} Progress Tracker", services.syllabus().title());
            let notes_dir = args.resolved_notes_dir();
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                export_dir: args.export_dir,
                notes_dir,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(title)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Status => {
            println!("{}", status_text(&services.syllabus(), &tracker.report()));
            Ok(())
        }
        Command::Export { out } => {
            let path = out.unwrap_or_else(|| args.export_dir.join(EXPORT_FILE_NAME));
            export_to(&tracker, &path).await?;
            println!("Progress exported to {}", path.display());
            Ok(())
        }
        Command::Import { path } => {
            let report = import_from(&tracker, &path).await.map_err(|err| {
                eprintln!("Error importing progress. Invalid file format.");
                err
            })?;
            println!(
                "Progress imported successfully! {}% complete.",
                report.overall.percentage
            );
            Ok(())
        }
        Command::Reset => {
            tracker.reset().await;
            println!("Progress has been reset!");
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "warn";

/// `RUST_LOG` directives when set and valid, `warn` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
