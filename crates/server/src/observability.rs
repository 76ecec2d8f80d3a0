use axum::{extract::Request, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("upn_http_requests_total", "Total HTTP requests handled")
        .expect("register http_requests_total")
});

pub static NORMALIZE_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("upn_normalize_total", "Phone normalization attempts via the API")
        .expect("register normalize_total")
});

pub static NORMALIZE_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("upn_normalize_rejected_total", "Phone numbers rejected by normalization")
        .expect("register normalize_rejected_total")
});

pub static PHONES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("upn_phones_created_total", "Phone records created")
        .expect("register phones_created_total")
});

pub static USAGES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("upn_usages_created_total", "Usage records created")
        .expect("register usages_created_total")
});

pub static CONFLICTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("upn_conflicts_total", "Writes rejected as duplicates")
        .expect("register conflicts_total")
});

/// Middleware counting every request that reaches the router.
pub async fn count_requests(req: Request, next: Next) -> Response {
    HTTP_REQUESTS_TOTAL.inc();
    next.run(req).await
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (axum::http::StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        NORMALIZE_TOTAL.inc();
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("upn_normalize_total"));
    }
}
