use std::fs::{create_dir_all, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::error::{MetricsError, MetricsResult};

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Default to `debug` instead of `info` when `RUST_LOG` is unset.
    pub verbose: bool,
    /// JSON lines on stdout instead of the human-readable format.
    pub json: bool,
    /// Also append to a timestamped file under the cache directory.
    pub log_file: bool,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("repo-metrics")
        .join("logs")
}

/// Install the global subscriber. Returns the log file path when one is used.
pub fn init_logging(options: &LogOptions) -> MetricsResult<Option<PathBuf>> {
    let default_level = if options.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if options.json {
        layers.push(fmt::layer().json().with_writer(std::io::stdout).boxed());
    } else {
        layers.push(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .boxed(),
        );
    }

    let mut log_file = None;
    if options.log_file {
        let dir = log_dir();
        create_dir_all(&dir)?;
        let path = dir.join(format!(
            "repo-metrics-{}.log",
            Local::now().format("%Y%m%d-%H%M%S")
        ));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        layers.push(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .boxed(),
        );
        log_file = Some(path);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| MetricsError::Unknown(format!("Failed to initialize logging: {}", e)))?;

    if let Some(path) = &log_file {
        tracing::info!(path = %path.display(), "Logging initialized");
    }
    install_panic_hook();
    Ok(log_file)
}

/// Route panics through the subscriber before the default hook prints them.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        tracing::error!(%location, "PANIC: {}", payload);
        previous(info);
    }));
}
