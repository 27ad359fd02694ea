//! Logging integration for alchemy-rs.
//!
//! Provides a helper for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings), and the span used around
//! attribute dispatch.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// In debug mode a pretty, human-readable format is used; otherwise a
/// structured JSON format is used. Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one attribute access on a mapped model.
///
/// # Examples
///
/// ```
/// use alchemy_rs_core::logging::attribute_span;
///
/// let span = attribute_span("interval", "length", "class");
/// let _guard = span.enter();
/// tracing::trace!("resolving");
/// ```
pub fn attribute_span(model: &str, attribute: &str, side: &str) -> tracing::Span {
    tracing::trace_span!("attribute", model, attribute, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let settings = Settings {
            log_level: "not a valid filter [".to_string(),
            ..Settings::default()
        };
        setup_logging(&settings);
        setup_logging(&Settings::default());
    }

    #[test]
    fn test_attribute_span_enter() {
        let span = attribute_span("interval", "length", "instance");
        let _guard = span.enter();
    }
}
