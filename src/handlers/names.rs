use axum::{extract::State, Json};

use crate::app::AppState;
use crate::models::{
    CanonicalizeRequest, CanonicalizeResponse, IsInRequest, MatchResponse, NormalizeRequest,
    NormalizeResponse,
};
use crate::names::{self, normalize::normalize_with};

#[utoipa::path(
    post,
    path = "/names/normalize",
    tag = "names",
    request_body = NormalizeRequest,
    responses(
        (status = 200, description = "Normalized name (null fields for a null name)", body = NormalizeResponse)
    )
)]
pub async fn normalize_name(Json(req): Json<NormalizeRequest>) -> Json<NormalizeResponse> {
    let normalized = req
        .name
        .as_deref()
        .map(|name| normalize_with(name, req.super_compact));

    Json(NormalizeResponse {
        normalized: normalized.as_ref().map(ToString::to_string),
        tokens: normalized.map(|n| n.into_tokens()),
    })
}

#[utoipa::path(
    post,
    path = "/names/canonicalize",
    tag = "names",
    request_body = CanonicalizeRequest,
    responses(
        (status = 200, description = "Canonical name, or null when the names differ", body = CanonicalizeResponse)
    )
)]
pub async fn canonicalize_names(
    State(state): State<AppState>,
    Json(req): Json<CanonicalizeRequest>,
) -> Json<CanonicalizeResponse> {
    let tolerance = req.tolerance.resolve(&state.config.tolerance);
    let canonical = match (req.a.as_deref(), req.b.as_deref()) {
        (Some(a), Some(b)) => names::canonicalize(a, b, &tolerance),
        _ => None,
    };
    tracing::debug!(a = ?req.a, b = ?req.b, ?canonical, "canonicalize");

    Json(CanonicalizeResponse {
        same: canonical.is_some(),
        canonical,
    })
}

#[utoipa::path(
    post,
    path = "/names/is-in",
    tag = "names",
    request_body = IsInRequest,
    responses(
        (status = 200, description = "Whether the name matches any of the names", body = MatchResponse)
    )
)]
pub async fn is_in_names(
    State(state): State<AppState>,
    Json(req): Json<IsInRequest>,
) -> Json<MatchResponse> {
    let tolerance = req.tolerance.resolve(&state.config.tolerance);
    let matched = req.name.as_deref().is_some_and(|name| {
        names::is_in(name, req.names.iter().map(String::as_str), &tolerance)
    });

    Json(MatchResponse { matched })
}
