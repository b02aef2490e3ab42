//! Tracing subscriber and Sentry client setup for the binary.

use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, ProxyConfig};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "draft_order_proxy=info,tower_http=debug";

/// Start the Sentry client if a DSN is configured.
///
/// The returned guard flushes pending events on drop and must outlive the
/// server.
#[must_use]
pub fn init_sentry(config: &ProxyConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    )))
}

/// Install the global subscriber: env filter, fmt layer in `format`, and the
/// Sentry layer.
///
/// Call after [`init_sentry`] so the Sentry layer binds to the live client.
pub fn init_tracing(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json_layer = (format == LogFormat::Json)
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (format == LogFormat::Text).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(|metadata| sentry_filter(*metadata.level())))
        .init();
}

/// WARN and ERROR become Sentry events, INFO and DEBUG breadcrumbs.
fn sentry_filter(level: Level) -> EventFilter {
    match level {
        Level::ERROR | Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentry_filter_levels() {
        assert_eq!(sentry_filter(Level::ERROR).bits(), EventFilter::Event.bits());
        assert_eq!(sentry_filter(Level::WARN).bits(), EventFilter::Event.bits());
        assert_eq!(sentry_filter(Level::INFO).bits(), EventFilter::Breadcrumb.bits());
        assert_eq!(sentry_filter(Level::DEBUG).bits(), EventFilter::Breadcrumb.bits());
        assert_eq!(sentry_filter(Level::TRACE).bits(), EventFilter::Ignore.bits());
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(DEFAULT_LOG_FILTER.parse::<EnvFilter>().is_ok());
    }
}
