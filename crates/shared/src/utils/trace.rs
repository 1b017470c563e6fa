use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

use super::{Method, Metrics, Status};

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

/// Opens one span per service operation and, when the operation ends,
/// closes it and records the outcome in the request metrics.
#[derive(Clone)]
pub struct ServiceTracer {
    name: &'static str,
    metrics: Arc<Mutex<Metrics>>,
}

impl std::fmt::Debug for ServiceTracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceTracer")
            .field("name", &self.name)
            .finish()
    }
}

impl ServiceTracer {
    pub fn new(name: &'static str, metrics: Arc<Mutex<Metrics>>) -> Self {
        Self { name, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer(self.name)
    }

    pub fn start(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {}", operation_name);

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub async fn complete_success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, true, message).await;
    }

    pub async fn complete_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete(tracing_ctx, method, false, error_message)
            .await;
    }

    async fn complete(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("Operation completed successfully: {}", message);
        } else {
            error!("Operation failed: {}", message);
        }

        self.metrics.lock().await.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}
