use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use roster_util::{GradeMode, RosterConfig, expand_tilde};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a log file when `--log-file` is absent.
const LOG_FILE_ENV: &str = "ROSTER_LOG_FILE";

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Enter students and review the roster in your terminal")]
struct Cli {
    /// Path to a JSON config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Edit the grade as free text or pick it from a list.
    #[arg(long, value_name = "free|select")]
    grade_mode: Option<GradeMode>,

    /// Comma-separated grade choices; implies `--grade-mode select`.
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    grades: Option<Vec<String>>,

    /// Theme id (dracula, ansi256).
    #[arg(long, value_name = "ID")]
    theme: Option<String>,

    /// Write logs to this file. The TUI owns the terminal, so logs are
    /// discarded when no file is given.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the resolved configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(log_file_path(&cli).as_deref(), cli.print_config)?;

    let mut config = RosterConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    apply_overrides(&mut config, &cli);
    debug!(?config, "resolved configuration");

    if cli.print_config {
        let grade_input = config.grade_input().context("invalid grade configuration")?;
        let out = serde_json::json!({
            "grade_input": grade_input,
            "theme": config.theme,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    roster_tui::run(&config).await
}

fn log_file_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.log_file {
        return Some(expand_tilde(&path.to_string_lossy()));
    }
    std::env::var(LOG_FILE_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(|value| expand_tilde(&value))
}

/// Installs a subscriber that writes to `log_file`, or to stderr when the
/// terminal is not taken over. Otherwise no subscriber is installed.
fn init_tracing(log_file: Option<&Path>, stderr_allowed: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else if stderr_allowed {
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    }
    Ok(())
}

fn apply_overrides(config: &mut RosterConfig, cli: &Cli) {
    if let Some(options) = &cli.grades {
        config.grade.mode = GradeMode::Select;
        config.grade.options = Some(options.clone());
    }
    if let Some(mode) = cli.grade_mode {
        config.grade.mode = mode;
    }
    if let Some(theme) = &cli.theme {
        config.theme = Some(theme.clone());
    }
}
