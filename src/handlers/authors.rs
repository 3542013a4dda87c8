use axum::{extract::State, Json};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::{
    AuthorEntryResponse, IsAuthorRequest, MatchResponse, ParseAuthorsRequest, SameAuthorsRequest,
};
use crate::names::{self, AuthorPosition};

#[utoipa::path(
    post,
    path = "/authors/is-author",
    tag = "authors",
    request_body = IsAuthorRequest,
    responses(
        (status = 200, description = "Whether the name is one of the authors", body = MatchResponse),
        (status = 400, description = "Invalid separator, order or position")
    )
)]
pub async fn is_author(
    State(state): State<AppState>,
    Json(req): Json<IsAuthorRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let format = req.format.resolve(&state.config.author_list_separator)?;
    let position = match &req.position {
        Some(param) => AuthorPosition::try_from(param)?,
        None => AuthorPosition::Any,
    };
    let tolerance = req.tolerance.resolve(&state.config.tolerance);

    let matched = match (req.name.as_deref(), req.authors.as_deref()) {
        (Some(name), Some(authors)) => names::is_author(name, authors, &format, position, &tolerance)?,
        _ => false,
    };

    Ok(Json(MatchResponse { matched }))
}

#[utoipa::path(
    post,
    path = "/authors/same",
    tag = "authors",
    request_body = SameAuthorsRequest,
    responses(
        (status = 200, description = "Whether both lists name the same authors", body = MatchResponse),
        (status = 400, description = "Invalid separator or order")
    )
)]
pub async fn same_authors(
    State(state): State<AppState>,
    Json(req): Json<SameAuthorsRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let format = req.format.resolve(&state.config.author_list_separator)?;
    let tolerance = req.tolerance.resolve(&state.config.tolerance);
    let matched = names::same_authors(req.a.as_deref(), req.b.as_deref(), &format, &tolerance)?;

    Ok(Json(MatchResponse { matched }))
}

#[utoipa::path(
    post,
    path = "/authors/parse",
    tag = "authors",
    request_body = ParseAuthorsRequest,
    responses(
        (status = 200, description = "Entries of the author list", body = Vec<AuthorEntryResponse>),
        (status = 400, description = "Invalid separator or order")
    )
)]
pub async fn parse_authors(
    State(state): State<AppState>,
    Json(req): Json<ParseAuthorsRequest>,
) -> Result<Json<Vec<AuthorEntryResponse>>, ApiError> {
    let format = req.format.resolve(&state.config.author_list_separator)?;
    let entries = names::parse_author_list(&req.authors, &format)?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
