//! HTTP middleware

use axum::{
    body::{Body, HttpBody},
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::state::AppState;

/// Metrics label for requests that matched no route
const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Request logging middleware
///
/// Counts the request per matched route and the response bytes when the
/// body length is known up front. Requests that hit no route share the
/// `unmatched` bucket.
pub async fn request_logger(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string());
    state.metrics.record_request(&endpoint);

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if let Some(len) = response.body().size_hint().exact() {
        state.metrics.record_bytes(len);
    }

    if status.is_success() {
        info!("{} {} {} in {:?}", method, uri, status, duration);
    } else {
        warn!("{} {} {} in {:?}", method, uri, status, duration);
    }

    response
}
