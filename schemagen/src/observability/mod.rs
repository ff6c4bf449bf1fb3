//! Observability (structured logging)
//!
//! The library only emits `tracing` events; binaries decide how to collect
//! them by calling [`init`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging stack
///
/// Sets up:
/// - Pretty formatting in debug builds, JSON formatting in release builds
/// - Environment-based log level filtering (`RUST_LOG`)
///
/// `verbose` raises the default filter when `RUST_LOG` is unset.
///
/// # Example
///
/// ```rust,no_run
/// use schemagen::observability;
///
/// # fn main() -> schemagen::Result<()> {
/// observability::init(false);
/// tracing::info!("Generator started");
/// # Ok(())
/// # }
/// ```
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // Writes go to stderr so generated sources on stdout stay clean.
    #[cfg(debug_assertions)]
    {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .try_init();
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init();
    }
}

/// Filter directive used when `RUST_LOG` is not set
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug,schemagen=trace"
    } else if cfg!(debug_assertions) {
        "info,schemagen=debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_directive() {
        assert_eq!(default_directive(true), "debug,schemagen=trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        init(false);
        init(true);
        tracing::debug!("still logging after second init");
    }
}
