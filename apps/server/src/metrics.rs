//! Prometheus metrics

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    /// One increment per service call, labelled by entity type and method.
    pub static ref SERVICE_INVOCATIONS: IntCounterVec = register_int_counter_vec!(
        "atlas_service_invocations_total",
        "Number of CRUD service invocations",
        &["entity", "method"]
    )
    .expect("service invocation counter registers once");
}

pub fn record_invocation(entity: &str, method: &str) {
    SERVICE_INVOCATIONS
        .with_label_values(&[entity, method])
        .inc();
}

pub fn invocation_count(entity: &str, method: &str) -> u64 {
    SERVICE_INVOCATIONS
        .with_label_values(&[entity, method])
        .get()
}

/// Render the default registry in the Prometheus text exposition format.
pub fn render() -> crate::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| crate::Error::Internal(format!("Failed to encode metrics: {e}")))?;
    String::from_utf8(buffer)
        .map_err(|e| crate::Error::Internal(format!("Metrics output is not UTF-8: {e}")))
}
