// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Global subscriber installation
//!
//! Console output always; with the `file-logging` feature and a
//! [`FileLoggingConfig`], also one JSON log per known crate plus a combined log in
//! a timestamped run folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       ├── brainmap-diagram.log
//!       ├── brainmap-config.log
//!       └── combined.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{FileLoggingConfig, LogFormat, LogOutput, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Keeps file writers alive; drop it last so buffered lines are flushed
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder of this process, when file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Install the global tracing subscriber
///
/// # Errors
/// Fails when a global subscriber is already installed or the run folder cannot be
/// created.
pub fn init_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(&config.level);
    let mut layers: Vec<BoxedLayer> = vec![console_layer(config, &filter)];

    let guard = match &config.file {
        Some(file_config) => add_file_layers(&mut layers, file_config, &filter)?,
        None => LoggingGuard {
            #[cfg(feature = "file-logging")]
            _file_guards: Vec::new(),
            log_dir: None,
        },
    };

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install the global tracing subscriber")?;

    if cfg!(not(feature = "file-logging")) && config.file.is_some() {
        tracing::warn!(
            target: "brainmap-observability",
            "File logging requested but this build lacks the file-logging feature"
        );
    }

    tracing::debug!(target: "brainmap-observability", "Logging initialized with filter '{}'", filter);
    Ok(guard)
}

/// Install console-only logging at `info` with the given debug flags
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(&LoggingConfig::default(), debug_flags)
}

fn console_layer(config: &LoggingConfig, filter: &str) -> BoxedLayer {
    let writer = match config.output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    match config.format {
        LogFormat::Text => layer.with_filter(EnvFilter::new(filter)).boxed(),
        LogFormat::Json => layer.json().with_filter(EnvFilter::new(filter)).boxed(),
    }
}

#[cfg(feature = "file-logging")]
fn add_file_layers(
    layers: &mut Vec<BoxedLayer>,
    file_config: &FileLoggingConfig,
    filter: &str,
) -> Result<LoggingGuard> {
    use tracing_appender::rolling;

    let run_folder = file_config.log_dir.join(run_folder_name(Utc::now()));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_logs(
        &file_config.log_dir,
        file_config.retention_days,
        file_config.retention_runs,
    )?;

    let mut file_guards = Vec::new();
    let file_layer = |writer: tracing_appender::non_blocking::NonBlocking, directives: String| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(EnvFilter::new(directives))
            .boxed()
    };

    for crate_name in crate::KNOWN_CRATES {
        let appender = rolling::daily(&run_folder, format!("{}.log", crate_name));
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guards.push(guard);
        // only this crate's events
        layers.push(file_layer(writer, format!("off,{}=debug", crate_name)));
    }

    let combined = rolling::daily(&run_folder, "combined.log");
    let (writer, guard) = tracing_appender::non_blocking(combined);
    file_guards.push(guard);
    layers.push(file_layer(writer, filter.to_string()));

    Ok(LoggingGuard {
        _file_guards: file_guards,
        log_dir: Some(run_folder),
    })
}

#[cfg(not(feature = "file-logging"))]
fn add_file_layers(
    _layers: &mut Vec<BoxedLayer>,
    _file_config: &FileLoggingConfig,
    _filter: &str,
) -> Result<LoggingGuard> {
    Ok(LoggingGuard { log_dir: None })
}

/// `run_YYYYMMDD_HHMMSS` for the given instant
pub fn run_folder_name(at: DateTime<Utc>) -> String {
    format!("{}{}", RUN_PREFIX, at.format(RUN_TIMESTAMP))
}

/// Start time encoded in a run folder name
pub fn parse_run_folder_name(name: &str) -> Option<DateTime<Utc>> {
    let stamp = name.strip_prefix(RUN_PREFIX)?;
    NaiveDateTime::parse_from_str(stamp, RUN_TIMESTAMP)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Delete run folders older than `retention_days`, then the oldest ones beyond
/// `retention_runs`
///
/// Directories that do not look like run folders are left alone. Returns the
/// number of folders removed.
pub fn cleanup_old_logs(base_log_dir: &Path, retention_days: u64, retention_runs: usize) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = Utc::now() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
    let entries = std::fs::read_dir(base_log_dir)
        .with_context(|| format!("Failed to list log directory: {}", base_log_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let started = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_run_folder_name);
        if let Some(started) = started {
            runs.push((path, started));
        }
    }

    // newest first
    runs.sort_by(|a, b| b.1.cmp(&a.1));

    let mut removed = 0;
    for (position, (path, started)) in runs.iter().enumerate() {
        if *started >= cutoff && position < retention_runs {
            continue;
        }
        match std::fs::remove_dir_all(path) {
            Ok(()) => removed += 1,
            Err(e) => eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            ),
        }
    }

    Ok(removed)
}
