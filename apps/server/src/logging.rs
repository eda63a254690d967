//! Logging initialization
//!
//! Sets up tracing with either JSON or human-readable output, an
//! `RUST_LOG` override, and optional rotating file output.

use std::fs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Guard that keeps the non-blocking file writer alive.
/// Must be held for the duration of the program when file logging is on.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initialize the global tracing subscriber from configuration.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let env_filter = build_env_filter(config);
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let file_guard = if config.json {
        init_json_logging(subscriber, config)?
    } else {
        init_human_logging(subscriber, config)?
    };

    tracing::info!(
        level = %config.level,
        json = config.json,
        file_enabled = config.file_enabled,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Suppress verbose sqlx statement logs by default.
        EnvFilter::new(format!(
            "sumika={},sumika_server={},tower_http=info,sqlx=warn",
            config.level, config.level
        ))
    })
}

fn init_json_logging<S>(
    subscriber: S,
    config: &LoggingConfig,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>>
where
    S: SubscriberExt + for<'a> tracing_subscriber::registry::LookupSpan<'a> + Send + Sync,
{
    let console_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(std::io::stdout);

    if config.file_enabled {
        let (file_appender, file_guard) = create_file_appender(config)?;
        let file_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(file_appender);

        subscriber.with(console_layer).with(file_layer).init();
        Ok(Some(file_guard))
    } else {
        subscriber.with(console_layer).init();
        Ok(None)
    }
}

fn init_human_logging<S>(
    subscriber: S,
    config: &LoggingConfig,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>>
where
    S: SubscriberExt + for<'a> tracing_subscriber::registry::LookupSpan<'a> + Send + Sync,
{
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stdout);

    if config.file_enabled {
        let (file_appender, file_guard) = create_file_appender(config)?;
        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(file_appender);

        subscriber.with(console_layer).with(file_layer).init();
        Ok(Some(file_guard))
    } else {
        subscriber.with(console_layer).init();
        Ok(None)
    }
}

fn create_file_appender(
    config: &LoggingConfig,
) -> anyhow::Result<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    fs::create_dir_all(&config.file_directory)?;

    let file_appender = match config.file_rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.file_directory, &config.file_prefix),
        "minutely" => {
            tracing_appender::rolling::minutely(&config.file_directory, &config.file_prefix)
        }
        "never" => tracing_appender::rolling::never(
            &config.file_directory,
            format!("{}.log", config.file_prefix),
        ),
        _ => tracing_appender::rolling::daily(&config.file_directory, &config.file_prefix),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    Ok((non_blocking, guard))
}
