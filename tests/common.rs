use axum::Router;
use ppgcc_metrics::{create_app, Config};

pub const TEST_TOKEN: &str = "test-token-0123456789abcdefghijklmnop";

/// Create the application router for testing, without authentication
pub fn create_test_app() -> Router {
    create_app(Config::default())
}

/// Create the application router for testing with `TEST_TOKEN` required
pub fn create_authenticated_app() -> Router {
    create_app(Config {
        api_tokens: vec![TEST_TOKEN.to_string()],
        ..Config::default()
    })
}
