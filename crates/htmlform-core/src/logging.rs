//! Logging setup for applications using htmlform.
//!
//! The builder logs through [`tracing`]: one debug span per record visited
//! and trace events for every emitted field and every lazily allocated
//! nested record. This module installs a subscriber for binaries and tests
//! that do not bring their own.

/// Sets up the global tracing subscriber.
///
/// `filter` is an `EnvFilter` directive such as `"htmlform_core=trace"`. An
/// unparsable directive falls back to `"info"`. With `pretty` set, a
/// human-readable format is used; otherwise structured JSON.
///
/// Does nothing if a global subscriber is already installed.
pub fn setup_logging(filter: &str, pretty: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if pretty {
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

/// Creates the span entered while building the form of one record.
pub fn build_span(record: &str, namespace: &[String]) -> tracing::Span {
    tracing::debug_span!("build_form", record, namespace = %namespace.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        setup_logging("htmlform_core=trace", true);
        setup_logging("not a [valid filter", false);
        tracing::trace!("after setup");
    }

    #[test]
    fn test_build_span_enters() {
        let span = build_span("Signup", &["a".to_string(), "b".to_string()]);
        let _guard = span.enter();
        tracing::debug!("inside build span");
    }
}
