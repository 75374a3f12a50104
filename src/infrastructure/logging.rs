//! Logging configuration
//!
//! Initializes tracing for the application. Logs go to stderr so that
//! YAML printed on stdout stays clean.
//!
//! The subscriber is installed before the configuration file is read, so
//! the level it asks for is applied afterwards through [`LogHandle`].

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

/// Level used until the configuration has been loaded
pub const STARTUP_LOG_LEVEL: &str = "info";

/// Adjusts the level of the installed subscriber
#[derive(Clone)]
pub struct LogHandle {
    filter: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogHandle {
    /// Switches to `level`; a no-op when `RUST_LOG` is set or another
    /// subscriber was already installed
    pub fn set_level(&self, level: &str) {
        let Some(filter) = &self.filter else {
            return;
        };

        if let Err(err) = filter.reload(EnvFilter::new(level)) {
            tracing::debug!(level, error = %err, "Could not change log level");
        } else {
            tracing::debug!(level, "Log level set");
        }
    }
}

/// Initializes logging with the specified level; `RUST_LOG` takes precedence
#[must_use]
pub fn init_logging(level: &str) -> LogHandle {
    let from_env = EnvFilter::try_from_default_env().ok();
    let pinned = from_env.is_some();
    let (filter, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new(level)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if let Err(err) = installed {
        tracing::debug!(error = %err, "Keeping the existing tracing subscriber");
        return LogHandle { filter: None };
    }

    LogHandle {
        filter: (!pinned).then_some(handle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        let first = init_logging("debug");
        let second = init_logging("info");

        assert!(second.filter.is_none());
        first.set_level("warn");
        second.set_level("warn");
    }
}
