use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    http::Response,
    middleware::Next,
    response::Response as AxumResponse,
};
use opentelemetry::KeyValue;
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::Span;

use super::metrics::{HTTP_REQUEST_DURATION, HTTP_REQUESTS_TOTAL};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Route template the request matched (`/tasks/{task_id}`), or the raw path
/// when no route matched. Only set for layers added through `Router::layer`.
pub fn route_of<B>(request: &axum::http::Request<B>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

#[derive(Clone)]
pub struct HttpMakeSpan;

impl<B> MakeSpan<B> for HttpMakeSpan {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let method = request.method().as_str();
        let route = route_of(request);
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };

        tracing::info_span!(
            "HTTP request",
            otel.name = %format!("{method} {route}"),
            http.request.method = %method,
            http.route = %route,
            url.path = %request.uri().path(),
            network.protocol.version = ?request.version(),
            user_agent.original = %header("user-agent"),
            http.request_id = %header(X_REQUEST_ID),
            http.response.status_code = tracing::field::Empty,
            otel.status_code = tracing::field::Empty,
        )
    }
}

#[derive(Clone)]
pub struct HttpOnResponse;

impl<B> OnResponse<B> for HttpOnResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status().as_u16();

        span.record("http.response.status_code", status as i64);
        span.record("otel.status_code", if status >= 500 { "ERROR" } else { "OK" });

        tracing::info!(
            http.response.status_code = status,
            latency_ms = latency.as_secs_f64() * 1000.0,
            "finished processing request"
        );
    }
}

/// Counts and times every request, labelled by method, route template and
/// status class.
pub async fn record_http_metrics(request: Request, next: Next) -> AxumResponse {
    let method = request.method().to_string();
    let route = route_of(&request);
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let labels = [
        KeyValue::new("http.request.method", method),
        KeyValue::new("http.route", route),
        KeyValue::new("http.status_class", format!("{}xx", status / 100)),
    ];
    HTTP_REQUESTS_TOTAL.add(1, &labels);
    HTTP_REQUEST_DURATION.record(start.elapsed().as_secs_f64() * 1000.0, &labels);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::{Body, to_bytes},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/tasks/{task_id}",
                get(|request: Request| async move { route_of(&request) }),
            )
            .layer(middleware::from_fn(record_http_metrics))
    }

    async fn body_text(app: Router, uri: &str) -> (u16, String) {
        let response = app
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_route_is_template_not_raw_path() {
        let (status, route) = body_text(app(), "/tasks/task_0a1b2c").await;
        assert_eq!(status, 200);
        assert_eq!(route, "/tasks/{task_id}");
    }

    #[tokio::test]
    async fn test_metrics_layer_passes_unmatched_requests_through() {
        let (status, _) = body_text(app(), "/nowhere").await;
        assert_eq!(status, 404);
    }

    #[test]
    fn test_unmatched_request_falls_back_to_path() {
        let request = axum::http::Request::builder()
            .uri("/nowhere?x=1")
            .body(())
            .unwrap();
        assert_eq!(route_of(&request), "/nowhere");
    }
}
