//! Structured logging.
//!
//! `RUST_LOG` takes precedence; otherwise the configured level is applied to
//! this crate. Output is human readable unless `log_format = "json"`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("steem_capacity={},warn", config.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    // try_init: a second call (tests, embedding) keeps the first subscriber.
    let result = if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
