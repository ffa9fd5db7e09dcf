//! Observability setup for chatmate: structured logging to stderr with an
//! optional OpenTelemetry span exporter.

pub mod tracing_setup;
