use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Installs the global subscriber: a pretty console layer driven by
/// `RUST_LOG`, and a bridge that ships `info` and above to the OTLP logger.
pub fn init_logger(sdk_logger_provider: SdkLoggerProvider) {
    let filter_otel = EnvFilter::new("info")
        .add_directive("hyper=off".parse().expect("valid"))
        .add_directive("opentelemetry=off".parse().expect("valid"))
        .add_directive("tonic=off".parse().expect("valid"))
        .add_directive("h2=off".parse().expect("valid"))
        .add_directive("sqlx=warn".parse().expect("valid"));

    let otel_layer = OpenTelemetryTracingBridge::new(&sdk_logger_provider).with_filter(filter_otel);

    let filter_fmt = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("tower_http=debug".parse().expect("valid"))
            .add_directive("sqlx=warn".parse().expect("valid"))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_names(true)
        .with_target(true)
        .pretty()
        .with_filter(filter_fmt);

    tracing_subscriber::registry()
        .with(otel_layer)
        .with(fmt_layer)
        .init();
}
