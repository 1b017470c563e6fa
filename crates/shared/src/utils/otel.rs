use anyhow::{Context, Result};
use opentelemetry::global;
use opentelemetry_otlp::{LogExporter, MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource, logs::SdkLoggerProvider, metrics::SdkMeterProvider,
    propagation::TraceContextPropagator, trace::SdkTracerProvider,
};

/// OTLP (gRPC) exporters for traces, metrics and logs of one service.
#[derive(Debug, Clone)]
pub struct Telemetry {
    service_name: String,
    endpoint: String,
}

impl Telemetry {
    pub fn new(service_name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            endpoint: endpoint.into(),
        }
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .build()
    }

    pub fn init_tracer(&self) -> Result<SdkTracerProvider> {
        let exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(self.endpoint.clone())
            .build()
            .context("Failed to build OTLP span exporter")?;

        let provider = SdkTracerProvider::builder()
            .with_resource(self.resource())
            .with_batch_exporter(exporter)
            .build();

        global::set_text_map_propagator(TraceContextPropagator::new());
        global::set_tracer_provider(provider.clone());

        Ok(provider)
    }

    pub fn init_meter(&self) -> Result<SdkMeterProvider> {
        let exporter = MetricExporter::builder()
            .with_tonic()
            .with_endpoint(self.endpoint.clone())
            .build()
            .context("Failed to build OTLP metric exporter")?;

        let provider = SdkMeterProvider::builder()
            .with_resource(self.resource())
            .with_periodic_exporter(exporter)
            .build();

        global::set_meter_provider(provider.clone());

        Ok(provider)
    }

    pub fn init_logger(&self) -> Result<SdkLoggerProvider> {
        let exporter = LogExporter::builder()
            .with_tonic()
            .with_endpoint(self.endpoint.clone())
            .build()
            .context("Failed to build OTLP log exporter")?;

        Ok(SdkLoggerProvider::builder()
            .with_resource(self.resource())
            .with_batch_exporter(exporter)
            .build())
    }
}
