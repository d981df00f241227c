use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gradle_pretty::app::{Config, ConfigOverrides, Settings};
use gradle_pretty::buildlog::{self, Classifier, LogMirror};
use gradle_pretty::ui::{self, SummaryOptions, TerminalRenderer};

/// Prettify the gradle build log
#[derive(Parser)]
#[command(name = "gradle-pretty")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example:\n  ./gradlew build 2>&1 | gradle-pretty")]
struct Cli {
    /// Path to save complete build log in
    #[arg(short = 'l', long, value_name = "PATH")]
    logfile: Option<PathBuf>,

    /// Do not save a copy of the complete build log
    #[arg(short = 'N', long)]
    no_logfile: bool,

    /// Ignore warnings
    #[arg(short = 'W', long)]
    no_warnings: bool,

    /// Config file (defaults to ~/.config/gradle-pretty/config.toml)
    #[arg(long, value_name = "PATH", env = "GRADLE_PRETTY_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ログ初期化（stdoutは進捗表示に使うためファイルへ出力）
    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let _ = io::stdout().flush();
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let log_dir = directories::ProjectDirs::from("", "", "gradle-pretty")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("gradle-pretty"));

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create {}", log_dir.display()))?;
    let log_file = std::fs::File::create(log_dir.join("gradle-pretty.log"))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_file),
        )
        .try_init()?;

    info!("gradle-pretty starting");
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    Ok(config.apply(&ConfigOverrides {
        logfile: cli.logfile.clone(),
        no_logfile: cli.no_logfile,
        no_warnings: cli.no_warnings,
    }))
}

fn run(cli: Cli) -> Result<u8> {
    let settings = load_settings(&cli)?;

    // ログファイルは入力を読む前に開く
    let mut mirror = match settings.logfile {
        Some(ref path) => Some(LogMirror::create(path)?),
        None => None,
    };

    let cwd = std::env::current_dir().context("Error reading current working directory")?;
    let build_root = buildlog::build_root_prefix(&cwd)?;
    let classifier = Classifier::new(build_root, settings.include_warnings);

    let width = ui::terminal_width(settings.fallback_width);
    let mut renderer = TerminalRenderer::new(io::stdout(), width);

    let session = buildlog::scan(
        io::stdin().lock(),
        &classifier,
        mirror.as_mut(),
        &mut renderer,
    )?;

    let logfile = match mirror {
        Some(mirror) => {
            let path = mirror.path().to_path_buf();
            mirror.close()?;
            Some(path)
        }
        None => None,
    };

    let verdict = ui::print_summary(
        &mut io::stdout().lock(),
        &session,
        &SummaryOptions { logfile },
    )?;
    info!("Build verdict: {:?}", verdict);

    Ok(verdict.exit_code())
}
