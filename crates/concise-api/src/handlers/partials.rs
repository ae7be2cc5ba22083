//! HTML partials embedded by the frontend.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::auth::MaybeIdentity;
use crate::render::{render_badge, render_pricing_section, PricingContext};
use crate::state::AppState;

/// Plan badge for the signed-in user; empty `204` for anonymous visitors.
pub async fn plan_badge(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
) -> Response {
    match state.resolver.resolve_or_free(identity.as_ref()).await {
        Some(resolution) => Html(render_badge(&resolution)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Pricing section with one card per plan.
pub async fn pricing_section(
    State(state): State<AppState>,
    identity: MaybeIdentity,
) -> Html<String> {
    let ctx = PricingContext {
        upload_url: state.config.url_for("/upload"),
        sign_in_url: state.config.url_for("/sign-in"),
        signed_in: identity.is_signed_in(),
    };

    Html(render_pricing_section(&state.catalog, &ctx))
}
