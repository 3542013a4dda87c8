pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod names;

pub use app::{create_app, ApiDoc, AppState};
pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use names::{
    canon_maps, canonicalize, is_author, is_in, normalize, same_authors, same_name, AuthorListFormat,
    AuthorPosition, MatchTolerance, NameError, NameOrder, ReconcileOptions,
};
