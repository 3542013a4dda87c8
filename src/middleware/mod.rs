pub mod auth;

pub use auth::{auth_middleware, is_well_formed_token};
