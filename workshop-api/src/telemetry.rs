//! Tracing subscriber setup.
//!
//! Events are split across two sinks: `warn` and above go to the error sink,
//! everything quieter goes to the debug sink. Each sink is a file when
//! configured and stderr otherwise.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{Level, Metadata};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry};
use workshop_store::app_config::{LogFormat, LoggingConfig};

pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to open log file {path}: {source}")]
    LogFile { path: String, source: io::Error },
    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Install the global subscriber. `RUST_LOG`, when set, overrides `config.level`.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.level_filter().to_string()));

    tracing_subscriber::registry()
        .with(build_layers(config)?)
        .with(filter)
        .try_init()?;

    Ok(())
}

/// One formatting layer per sink, without the global level filter.
pub fn build_layers(config: &LoggingConfig) -> Result<Vec<BoxedLayer>, TelemetryError> {
    let error_sink = sink_layer(config.format, config.error_file.as_deref())?
        .with_filter(filter_fn(|meta| meta.is_span() || is_error_sink(meta)))
        .boxed();
    let debug_sink = sink_layer(config.format, config.debug_file.as_deref())?
        .with_filter(filter_fn(|meta| meta.is_span() || !is_error_sink(meta)))
        .boxed();

    Ok(vec![error_sink, debug_sink])
}

fn is_error_sink(meta: &Metadata<'_>) -> bool {
    *meta.level() <= Level::WARN
}

fn sink_layer(format: LogFormat, path: Option<&Path>) -> Result<BoxedLayer, TelemetryError> {
    let (writer, ansi) = match path {
        Some(path) => (BoxMakeWriter::new(Arc::new(open_log_file(path)?)), false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
    };

    Ok(layer)
}

fn open_log_file(path: &Path) -> Result<File, TelemetryError> {
    let to_err = |source| TelemetryError::LogFile {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_err)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use workshop_core::{emit, Severity};

    fn file_config(dir: &Path, format: LogFormat) -> LoggingConfig {
        LoggingConfig {
            error_file: Some(dir.join("log").join("workshop.error.log")),
            debug_file: Some(dir.join("log").join("workshop.debug.log")),
            format,
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_events_are_routed_by_severity() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(dir.path(), LogFormat::Pretty);
        let subscriber = tracing_subscriber::registry().with(build_layers(&config).unwrap());

        tracing::subscriber::with_default(subscriber, || {
            emit!(Severity::Fatal, "config exploded");
            emit!(Severity::Error, "lookup failed");
            emit!(Severity::Warn, "missing parameter");
            emit!(Severity::Info, "discount granted");
            emit!(Severity::Debug, "fetching product");
            emit!(Severity::Trace, "request received");
        });

        let errors = fs::read_to_string(dir.path().join("log/workshop.error.log")).unwrap();
        let debug = fs::read_to_string(dir.path().join("log/workshop.debug.log")).unwrap();

        for line in ["config exploded", "lookup failed", "missing parameter"] {
            assert!(errors.contains(line), "error sink missing {:?}", line);
            assert!(!debug.contains(line), "debug sink leaked {:?}", line);
        }
        for line in ["discount granted", "fetching product", "request received"] {
            assert!(debug.contains(line), "debug sink missing {:?}", line);
            assert!(!errors.contains(line), "error sink leaked {:?}", line);
        }
        assert!(errors.contains("fatal=true"));
    }

    #[test]
    fn test_json_format_carries_span_fields() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(dir.path(), LogFormat::Json);
        let subscriber = tracing_subscriber::registry().with(build_layers(&config).unwrap());

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("request", request_id = "abc-123");
            let _guard = span.enter();
            tracing::warn!("no product id supplied");
        });

        let errors = fs::read_to_string(dir.path().join("log/workshop.error.log")).unwrap();
        let line = errors.lines().next().expect("one json line");
        assert!(line.starts_with('{'));
        assert!(line.contains("\"request_id\":\"abc-123\""));
        assert!(line.contains("no product id supplied"));
    }

    #[test]
    fn test_second_init_reports_error() {
        let config = LoggingConfig::default();
        let _ = init(&config);

        assert!(matches!(init(&config), Err(TelemetryError::Init(_))));
    }

    #[test]
    fn test_unwritable_log_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let config = LoggingConfig {
            error_file: Some(blocker.join("error.log")),
            ..LoggingConfig::default()
        };

        match build_layers(&config) {
            Err(TelemetryError::LogFile { path, .. }) => assert!(path.ends_with("error.log")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected log file error"),
        }
    }
}
