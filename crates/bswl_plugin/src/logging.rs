//! Tracing setup: host log window, daily rolling file, env-driven filter.

use crate::host::SharedLogSink;
use camino::Utf8Path;
use std::fs;
use std::time::{Duration, SystemTime};
use tracing::field::{Field, Visit};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "bswl_core=info,bswl_plugin=info";
const LOG_FILE_PREFIX: &str = "bswl";
pub const LOG_RETENTION_DAYS: u64 = 7;

/// Collects tracing event fields into a single message string.
struct MessageVisitor {
    message: String,
}

impl MessageVisitor {
    fn new() -> Self {
        Self {
            message: String::new(),
        }
    }

    fn push_field(&mut self, name: &str, value: String) {
        if name == "message" {
            self.message = if self.message.is_empty() {
                value
            } else {
                format!("{} {}", value, self.message)
            };
        } else if !self.message.is_empty() {
            self.message.push_str(&format!(" {}={}", name, value));
        } else {
            self.message = format!("{}={}", name, value);
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.push_field(field.name(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push_field(field.name(), value.to_string());
    }
}

/// Forwards every event to the host's log window as `[LEVEL] target: message`.
pub struct HostLogLayer {
    sink: SharedLogSink,
}

impl HostLogLayer {
    pub fn new(sink: SharedLogSink) -> Self {
        Self { sink }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for HostLogLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let mut visitor = MessageVisitor::new();
        event.record(&mut visitor);

        self.sink.log(&format!(
            "[{}] {}: {}",
            metadata.level(),
            metadata.target(),
            visitor.message
        ));
    }
}

/// Install the global subscriber.
///
/// Returns the file writer guard, which must be kept alive for buffered
/// lines to reach disk. A second call is a no-op: the host may load the
/// plugin more than once per process.
pub fn init_logging(sink: SharedLogSink, log_dir: Option<&Utf8Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let (file_guard, file_layer) = match log_dir {
        Some(log_dir) => match file_writer(log_dir) {
            Some((non_blocking, guard)) => {
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(guard), Some(layer))
            }
            None => (None, None),
        },
        None => (None, None),
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(HostLogLayer::new(sink));
    let installed = if let Some(layer) = file_layer {
        registry.with(layer).try_init()
    } else {
        registry.try_init()
    };

    match installed {
        Ok(()) => {
            if let Some(log_dir) = log_dir {
                cleanup_old_logs(log_dir, LOG_RETENTION_DAYS);
            }
            file_guard
        }
        Err(_) => None,
    }
}

fn file_writer(
    log_dir: &Utf8Path,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("Failed to create log directory {}: {}", log_dir, e);
        return None;
    }

    match rolling::RollingFileAppender::builder()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
    {
        Ok(appender) => Some(tracing_appender::non_blocking(appender)),
        Err(e) => {
            eprintln!("Failed to create log file appender in {}: {}", log_dir, e);
            None
        }
    }
}

/// Delete dated log files older than `max_age_days` from the log directory.
pub fn cleanup_old_logs(log_dir: &Utf8Path, max_age_days: u64) {
    let max_age = Duration::from_secs(max_age_days * 24 * 60 * 60);

    let entries = match fs::read_dir(log_dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!("Failed to read log directory for cleanup: {}", e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        // e.g. "bswl.2026-10-19.log"
        if !is_rolled_log_name(file_name) {
            continue;
        }

        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        let Ok(age) = SystemTime::now().duration_since(modified) else {
            continue;
        };

        if age > max_age {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("Failed to delete old log file {}: {}", path.display(), e);
            } else {
                tracing::info!("Deleted old log file: {}", path.display());
            }
        }
    }
}

fn is_rolled_log_name(file_name: &str) -> bool {
    file_name.starts_with(&format!("{}.", LOG_FILE_PREFIX)) && file_name.ends_with(".log")
}
