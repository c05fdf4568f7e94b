use super::AUTH_TAG;
use super::state::ApiState;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CasQuery {
    /// Absolute URL the CAS server should return to after login
    service: Option<String>,
}

/// CAS single sign-on wiring
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CasResponse {
    server_url: String,
    login_url_name: String,
    logout_url_name: String,
    redirect_url: String,
    check_next: bool,
    /// Present when a `service` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    login_url: Option<String>,
    logout_url: String,
}

#[utoipa::path(
    get,
    path = "/api/cas",
    params(CasQuery),
    responses(
        (status = OK, description = "CAS server and route names", body = CasResponse),
        (status = INTERNAL_SERVER_ERROR, description = "CAS urls could not be built"),
    ),
    tag = AUTH_TAG,
)]
pub(super) async fn cas_handler(
    State(state): State<ApiState>,
    Query(query): Query<CasQuery>,
) -> Result<Json<CasResponse>, StatusCode> {
    let cas = &state.settings.cas;

    let login_url = query
        .service
        .as_deref()
        .map(|service| state.cas.login(service).map(String::from))
        .transpose();
    let logout_url = state.cas.logout(None).map(String::from);

    let (login_url, logout_url) = match (login_url, logout_url) {
        (Ok(login), Ok(logout)) => (login, logout),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Failed to build CAS urls: {e}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(CasResponse {
        server_url: cas.server_url.clone(),
        login_url_name: cas.login_url_name.clone(),
        logout_url_name: cas.logout_url_name.clone(),
        redirect_url: cas.redirect_url.clone(),
        check_next: cas.check_next,
        login_url,
        logout_url,
    }))
}
