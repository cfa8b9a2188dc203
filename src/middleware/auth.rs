use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Supplies the expected API key. Consulted on every request so a changed
/// value takes effect without a restart.
#[derive(Clone)]
pub struct ApiKeySource(Arc<dyn Fn() -> Option<String> + Send + Sync>);

impl ApiKeySource {
    pub fn from_env(var: impl Into<String>) -> Self {
        let var = var.into();
        Self::from_fn(move || std::env::var(&var).ok())
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// An empty value counts as unset.
    pub fn expected(&self) -> Option<String> {
        (self.0)().filter(|key| !key.is_empty())
    }
}

impl std::fmt::Debug for ApiKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKeySource(..)")
    }
}

pub async fn require_api_key(
    State(source): State<ApiKeySource>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let api_key_header = req.headers().get(API_KEY_HEADER);

    let expected_key = source.expected();

    // Raw bytes, so keys outside visible ASCII can still match.
    let rejection = match (api_key_header, expected_key.as_deref()) {
        (Some(key), Some(expected)) if key.as_bytes() == expected.as_bytes() => None,
        (_, None) => Some("no API key configured"),
        (None, _) => Some("missing x-api-key header"),
        (Some(_), Some(_)) => Some("invalid API key"),
    };

    match rejection {
        None => Ok(next.run(req).await),
        Some(reason) => {
            warn!("Rejected {} {}: {}", req.method(), req.uri().path(), reason);
            Err(unauthorized())
        }
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Invalid or missing API key").into_response()
}
