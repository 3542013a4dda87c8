use axum::{extract::State, Json};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::{ApplyMapRequest, ApplyMapResponse, CanonMapsRequest, CanonMapsResponse};
use crate::names::{self, ReconcileOptions};

#[utoipa::path(
    post,
    path = "/reconcile/maps",
    tag = "reconcile",
    request_body = CanonMapsRequest,
    responses(
        (status = 200, description = "One correction map per collection", body = CanonMapsResponse),
        (status = 400, description = "Edit distance above the allowed maximum"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn canon_maps(
    State(state): State<AppState>,
    Json(req): Json<CanonMapsRequest>,
) -> Result<Json<CanonMapsResponse>, ApiError> {
    let options = ReconcileOptions {
        allow_ambiguous: req.allow_ambiguous,
        max_edit_distance: req
            .max_edit_distance
            .unwrap_or(state.config.reconcile_max_edit_distance),
        max_last_edit_distance: req.max_last_edit_distance,
        large_last_name_threshold: req
            .large_last_name_threshold
            .unwrap_or(state.config.tolerance.large_last_name_threshold),
    };
    options.validate()?;
    let sizes: Vec<usize> = req.collections.iter().map(Vec::len).collect();
    tracing::info!(?sizes, ?options, "Reconciling name collections");

    // quadratic in the collection sizes; keep it off the async workers
    let maps = tokio::task::spawn_blocking(move || names::canon_maps(req.collections, &options))
        .await
        .map_err(|e| ApiError::Internal(format!("reconciliation task failed: {e}")))?;

    let corrections: usize = maps.iter().map(|m| m.len()).sum();
    tracing::info!(corrections, "Reconciliation finished");

    Ok(Json(CanonMapsResponse { maps }))
}

#[utoipa::path(
    post,
    path = "/reconcile/apply",
    tag = "reconcile",
    request_body = ApplyMapRequest,
    responses(
        (status = 200, description = "Records with corrected name columns", body = ApplyMapResponse)
    )
)]
pub async fn apply_map(Json(req): Json<ApplyMapRequest>) -> Json<ApplyMapResponse> {
    let records = names::apply_canon_map(&req.records, &req.fields, &req.map);
    Json(ApplyMapResponse { records })
}
