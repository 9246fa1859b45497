//! Tracing subscriber initialisation
//!
//! The filter comes from `RUST_LOG` when it is set, otherwise from
//! [`LoggingConfig::level`]. The output format follows [`LoggingConfig::format`].

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Error returned when a global subscriber is already installed
#[derive(Debug, thiserror::Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct InitError(#[source] TryInitError);

/// Build the filter used by [`init_tracing`]
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global tracing subscriber
///
/// Returns an error instead of panicking when called twice, so tests and
/// embedding applications can call it unconditionally.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InitError> {
    let filter = build_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(config.colored)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_ansi(config.colored).with_target(true))
            .try_init(),
    };

    result.map_err(InitError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        let config = LoggingConfig {
            format: LogFormat::Compact,
            ..Default::default()
        };

        // The first call may already have happened in another test of this binary.
        let _ = init_tracing(&config);
        let err = init_tracing(&config).unwrap_err();
        assert!(err.to_string().starts_with("failed to install tracing subscriber"));
    }
}
