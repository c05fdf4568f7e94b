use axum::Router;
use contest_kernel::server::{ApiState, apply_middleware, system_router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Contest", description = "Contest quiz service"))]
struct ApiDoc;

/// Builds the full application router for `state`.
pub fn init(state: ApiState) -> Router {
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(system_router())
        .with_state(state.clone())
        .split_for_parts();

    let static_prefix = format!("/{}", state.settings.static_files.url.trim_matches('/'));
    let static_dir = state.settings.static_dir();
    debug!(prefix = %static_prefix, dir = %static_dir.display(), "Serving static files");

    let router = Router::new()
        .merge(api_routes)
        .merge(Scalar::with_url("/api", api_doc))
        .nest_service(&static_prefix, ServeDir::new(static_dir));

    apply_middleware(router, &state).layer(TraceLayer::new_for_http())
}
