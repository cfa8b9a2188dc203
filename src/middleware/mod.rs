pub mod auth;

pub use auth::{require_api_key, ApiKeySource, API_KEY_HEADER};
