use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Initialize the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Logs go to stderr
/// so command output on stdout stays machine-readable.
pub fn init(json: bool) -> Result<(), LoggingError> {
    let filter_layer = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new("info")?,
    };
    let registry = tracing_subscriber::registry().with(filter_layer);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing::{info, warn};

    use super::*;

    #[test]
    fn test_logging_init() {
        // Only the first init in a process succeeds
        let first = init(false);
        let second = init(true);
        assert!(first.is_ok() || matches!(first, Err(LoggingError::Init(_))));
        assert!(matches!(second, Err(LoggingError::Init(_))));

        info!("This is an info message");
        warn!("This is a warning message");
    }
}
