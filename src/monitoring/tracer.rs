/*!
 * Structured Tracing
 * Subscriber setup and per-run spans using the tracing crate
 */

use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - PARTITION_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("PARTITION_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_span_events(FmtSpan::NONE)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
        debug!("Structured tracing initialized");
    }
}

/// Generate a unique id for correlating the events of one simulation run
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one simulation run
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    run_id: String,
}

impl RunSpan {
    pub fn new(strategy: &str, total_size: usize, requests: usize) -> Self {
        let run_id = generate_run_id();

        let span = span!(
            Level::INFO,
            "simulation",
            run_id = %run_id,
            strategy = strategy,
            total_size = total_size,
            requests = requests,
            accepted = tracing::field::Empty,
            rejected = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            run_id,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    /// Record final accepted/rejected counts
    pub fn record_outcomes(&self, accepted: usize, rejected: usize) {
        self.span.record("accepted", accepted);
        self.span.record("rejected", rejected);
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_us", duration.as_micros() as u64);
        let _entered = self.span.enter();
        debug!(
            run_id = %self.run_id,
            duration_us = duration.as_micros() as u64,
            "simulation span closed"
        );
    }
}
