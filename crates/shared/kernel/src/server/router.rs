use super::state::ApiState;
use super::{cas, health, quiz};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes every contest deployment exposes: health, quiz policy and CAS wiring.
pub fn system_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(health::health_handler))
        .routes(routes!(quiz::policy_handler))
        .routes(routes!(cas::cas_handler))
}
