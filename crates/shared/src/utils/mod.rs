mod di;
mod errors;
mod log;
mod metrics;
mod otel;
mod trace;

pub use self::di::DependenciesInject;
pub use self::errors::AppError;
pub use self::log::init_logger;
pub use self::metrics::{Method, MethodLabels, Metrics, Status};
pub use self::otel::Telemetry;
pub use self::trace::{ServiceTracer, TracingContext};
