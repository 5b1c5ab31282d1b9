//! Prometheus exposition for the `metrics` facade.
//!
//! The recorder is installed lazily on first use so that the HTTP middleware,
//! domain counters and the `/metrics` endpoint all share one registry.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static PROMETHEUS: OnceLock<PrometheusHandle> = OnceLock::new();

/// Handle to the process-wide Prometheus recorder.
pub fn prometheus_handle() -> &'static PrometheusHandle {
    PROMETHEUS.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        if metrics::set_global_recorder(recorder).is_err() {
            tracing::warn!("A global metrics recorder was already installed");
        }
        handle
    })
}

/// Current metrics in Prometheus text format.
pub fn render_metrics() -> String {
    prometheus_handle().render()
}
