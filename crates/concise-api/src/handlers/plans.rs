//! JSON plan endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use concise_models::PlanCatalog;

use crate::auth::MaybeIdentity;
use crate::config::RuntimeMode;
use crate::error::ApiResult;
use crate::state::AppState;

/// Current plan of the signed-in user.
///
/// `204 No Content` when nobody is signed in; billing failures surface as
/// `502 Bad Gateway`.
pub async fn get_current_plan(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
) -> ApiResult<Response> {
    let resolution = state.resolver.resolve(identity.as_ref()).await?;

    Ok(match resolution {
        Some(resolution) => Json(resolution).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// The full plan catalog.
pub async fn list_plans(State(state): State<AppState>) -> Json<PlanCatalog> {
    Json(state.catalog.as_ref().clone())
}

/// Public client configuration.
#[derive(Serialize)]
pub struct ClientConfigResponse {
    pub mode: RuntimeMode,
    pub origin_url: String,
}

/// Runtime mode and frontend origin.
pub async fn get_client_config(State(state): State<AppState>) -> Json<ClientConfigResponse> {
    Json(ClientConfigResponse {
        mode: state.config.mode,
        origin_url: state.config.origin_url().to_string(),
    })
}
