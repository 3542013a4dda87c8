use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::handlers;
use crate::middleware::auth_middleware;
use crate::models;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::names::normalize_name,
        handlers::names::canonicalize_names,
        handlers::names::is_in_names,
        handlers::authors::is_author,
        handlers::authors::same_authors,
        handlers::authors::parse_authors,
        handlers::reconcile::canon_maps,
        handlers::reconcile::apply_map,
    ),
    components(schemas(
        models::ToleranceParams,
        models::NormalizeRequest,
        models::NormalizeResponse,
        models::CanonicalizeRequest,
        models::CanonicalizeResponse,
        models::IsInRequest,
        models::MatchResponse,
        models::FormatParams,
        models::PositionParam,
        models::IsAuthorRequest,
        models::SameAuthorsRequest,
        models::ParseAuthorsRequest,
        models::AuthorEntryResponse,
        models::CanonMapsRequest,
        models::CanonMapsResponse,
        models::ApplyMapRequest,
        models::ApplyMapResponse,
    )),
    tags(
        (name = "names", description = "Name normalization and pairwise matching"),
        (name = "authors", description = "Citation author lists"),
        (name = "reconcile", description = "Cross-source name reconciliation"),
    )
)]
pub struct ApiDoc;

/// Build the application router. Everything except `/` and the API docs
/// sits behind the bearer-token check.
pub fn create_app(config: Config) -> Router {
    let state = AppState::new(config);

    let api = Router::new()
        .route("/names/normalize", post(handlers::normalize_name))
        .route("/names/canonicalize", post(handlers::canonicalize_names))
        .route("/names/is-in", post(handlers::is_in_names))
        .route("/authors/is-author", post(handlers::is_author))
        .route("/authors/same", post(handlers::same_authors))
        .route("/authors/parse", post(handlers::parse_authors))
        .route("/reconcile/maps", post(handlers::canon_maps))
        .route("/reconcile/apply", post(handlers::apply_map))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state);

    Router::new()
        .route("/", get(root))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "PPGCC names API"
}
