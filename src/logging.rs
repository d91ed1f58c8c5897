use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::errors::{LoanError, Result};

fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// install the global subscriber; fails if one is already set
pub fn try_init_logger(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(filter(config));

    let result = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init()
    };

    result.map_err(|e| LoanError::InvalidConfiguration {
        message: format!("logger already initialised: {}", e),
    })
}

/// install the global subscriber, ignoring a second call
pub fn init_logger(config: &LoggingConfig) {
    let _ = try_init_logger(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_reported() {
        let config = LoggingConfig::default();
        init_logger(&config);
        assert!(try_init_logger(&config).is_err());
    }
}
