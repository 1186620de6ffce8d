//! API middleware

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::identity::Identity;

/// Gateway identity middleware
///
/// Reads the identity headers forwarded by the auth gateway and makes the
/// caller available to handlers as a request extension. Requests without a
/// usable identity never reach a handler.
pub async fn identity_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    match Identity::from_headers(request.headers()) {
        Some(identity) => {
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        None => {
            warn!("missing or malformed gateway identity headers");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Request logging middleware
///
/// Logs all API requests for compliance and debugging
pub async fn request_log_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request
        .extensions()
        .get::<Identity>()
        .map(|identity| identity.user_id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
