//! Prometheus metrics handler
//!
//! Exposes `GET /metrics` in Prometheus text format from the recorder
//! installed at startup.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics::Unit;
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared state for the metrics endpoint
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Register help text for every metric the service emits.
pub fn describe_metrics() {
    metrics::describe_counter!(
        "http_requests_total",
        "HTTP requests by method, matched route and status"
    );
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "HTTP request latency by method and matched route"
    );
    metrics::describe_counter!(
        "fare_calculations_total",
        "Fare calculations by vehicle type (unknown when unrecognized) and outcome"
    );
    metrics::describe_histogram!("fare_amount", "Calculated fare totals by vehicle type");
}

/// `GET /metrics`: Prometheus scrape endpoint
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::Service;

    #[tokio::test]
    async fn test_renders_recorded_fare_counters() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, || {
            metrics::counter!("fare_calculations_total", "vehicle_type" => "car", "status" => "success")
                .increment(2);
        });

        let mut svc = Router::new()
            .route("/metrics", get(prometheus_metrics))
            .with_state(MetricsState { handle })
            .into_service();
        let resp = svc
            .call(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("fare_calculations_total"));
        assert!(text.contains("vehicle_type=\"car\""));
    }
}
