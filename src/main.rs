//! Recordbook - A terminal client for a remote record collection.
//!
//! # Usage
//!
//! ```bash
//! recordbook
//! recordbook --endpoint http://localhost:8000/data
//! recordbook --reset-on-submit --timeout 10 --save
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use recordbook::app::{App, ResetPolicy};
use recordbook::client::DEFAULT_ENDPOINT;
use recordbook::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};

/// A terminal client for a remote record collection
#[derive(Parser, Debug)]
#[command(name = "recordbook", version, about, long_about = None)]
struct Cli {
    /// Collection endpoint (default: $RECORDBOOK_ENDPOINT or http://localhost:8000/data)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Clear the form as soon as a submit is sent instead of after success
    #[arg(long)]
    reset_on_submit: bool,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Write logs to a file (default: $RECORDBOOK_LOG; otherwise logs are dropped)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    /// Flags that persist in config files.
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            endpoint: self.endpoint.clone(),
            reset_on_submit: self.reset_on_submit,
            timeout_secs: self.timeout,
            log_file: self.log_file.clone(),
        }
    }
}

/// Where log output goes.
///
/// The TUI owns the terminal, so without a log file events are dropped
/// instead of being written over the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    Discard,
    File(PathBuf),
}

impl LogTarget {
    fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Discard, Self::File)
    }

    fn make_writer(&self) -> Result<BoxMakeWriter> {
        match self {
            Self::Discard => Ok(BoxMakeWriter::new(io::sink)),
            Self::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file {}", path.display()))?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
        }
    }
}

fn log_subscriber(target: &LogTarget) -> Result<impl tracing::Subscriber + Send + Sync + 'static> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(target.make_writer()?)
        .finish())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let log_target = LogTarget::from_path(
        effective
            .log_file
            .clone()
            .or_else(|| std::env::var_os("RECORDBOOK_LOG").map(PathBuf::from)),
    );
    tracing::subscriber::set_global_default(log_subscriber(&log_target)?)
        .context("Failed to install logger")?;
    debug!(?global_path, ?local_path, ?effective, "resolved config");

    let endpoint = effective
        .endpoint
        .clone()
        .or_else(|| std::env::var("RECORDBOOK_ENDPOINT").ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let reset_policy = if effective.reset_on_submit {
        ResetPolicy::Immediate
    } else {
        ResetPolicy::OnSuccess
    };
    info!(%endpoint, ?reset_policy, timeout = ?effective.timeout_secs, "configured");

    let mut app = App::new(endpoint)
        .with_reset_policy(reset_policy)
        .with_timeout(effective.timeout_secs.map(Duration::from_secs));

    app.run().context("Application error")
}
