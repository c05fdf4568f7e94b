//! HTTP enforcement of the middleware stack.

use super::state::ApiState;
use axum::Router;
use axum::extract::{Request, State};
use axum::http::header::{HOST, ORIGIN, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use contest_domain::components::Middleware;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, warn};

const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");

/// Wraps `router` with the configured middleware, first entry outermost.
///
/// Entries without an HTTP-level effect are left to the application layer.
pub fn apply_middleware(mut router: Router, state: &ApiState) -> Router {
    for middleware in state.settings.middleware.iter().rev() {
        if !middleware.is_http_layer() {
            debug!(middleware = %middleware, "Delegated to the application layer");
            continue;
        }
        router = match middleware {
            Middleware::Security => router
                .layer(SetResponseHeaderLayer::if_not_present(
                    X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    REFERRER_POLICY,
                    HeaderValue::from_static("same-origin"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    CROSS_ORIGIN_OPENER_POLICY,
                    HeaderValue::from_static("same-origin"),
                )),
            Middleware::Common => router.layer(from_fn_with_state(state.clone(), host_guard)),
            Middleware::Csrf => router.layer(from_fn_with_state(state.clone(), csrf_guard)),
            Middleware::Clickjacking => router.layer(SetResponseHeaderLayer::if_not_present(
                X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            )),
            _ => router,
        };
    }
    router
}

/// Raw host of the request: the `Host` header, or the URI authority (HTTP/2).
fn raw_host(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| request.uri().authority().map(|authority| authority.as_str()))
}

/// Rejects requests whose host is not allowed with `400 Bad Request`.
pub async fn host_guard(State(state): State<ApiState>, request: Request, next: Next) -> Response {
    let host = raw_host(&request).unwrap_or_default();
    if state.allowed_hosts.validate(host).is_none() {
        warn!(host = %host, "Invalid HTTP_HOST header; the host is not in the allowlist");
        return (StatusCode::BAD_REQUEST, "Bad Request (400)").into_response();
    }
    next.run(request).await
}

/// Rejects unsafe requests without a trusted `Origin` with `403 Forbidden`.
pub async fn csrf_guard(State(state): State<ApiState>, request: Request, next: Next) -> Response {
    if crate::security::csrf::is_safe_method(request.method().as_str()) {
        return next.run(request).await;
    }

    let origin = request.headers().get(ORIGIN).and_then(|value| value.to_str().ok());
    let good_host =
        raw_host(&request).filter(|host| state.allowed_hosts.validate(host).is_some());

    let verified = origin.is_some_and(|origin| {
        state.trusted_origins.verify(origin, good_host, state.secure)
    });

    if !verified {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            origin = origin.unwrap_or("<missing>"),
            "Forbidden (403): origin checking failed"
        );
        return (StatusCode::FORBIDDEN, "Forbidden (403): CSRF verification failed").into_response();
    }

    next.run(request).await
}
