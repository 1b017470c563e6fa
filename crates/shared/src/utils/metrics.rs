use prometheus_client::{
    metrics::{
        counter::Counter,
        family::Family,
        histogram::{Histogram, exponential_buckets},
    },
    registry::Registry,
};
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct MethodLabels {
    pub method: Method,
    pub status: Status,
}

#[derive(Debug, Clone)]
pub struct Metrics {
    pub request_counter: Family<MethodLabels, Counter>,
    pub request_duration: Family<MethodLabels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::<MethodLabels, Histogram>::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.005, 2.0, 12))
            }),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "service_requests",
            "Total number of service operations",
            self.request_counter.clone(),
        );
        registry.register(
            "service_request_duration_seconds",
            "Histogram of service operation durations",
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, elapsed: f64) {
        let labels = MethodLabels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration.get_or_create(&labels).observe(elapsed);
    }
}
