use axum::{extract::State, middleware, response::Json, routing::get, Router};
use std::sync::Arc;

use crate::{
    middleware::{require_api_key, ApiKeySource},
    models::{HealthResponse, NamespaceSummary},
    settings::Settings,
};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

pub fn create_routes(settings: Arc<Settings>, api_key: ApiKeySource) -> Router {
    let state = AppState { settings };

    let protected = Router::new()
        .route("/namespaces", get(list_namespaces))
        .layer(middleware::from_fn_with_state(api_key, require_api_key));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected)
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn list_namespaces(State(state): State<AppState>) -> Json<Vec<NamespaceSummary>> {
    let summaries = state
        .settings
        .namespaced()
        .iter()
        .map(|(name, group)| NamespaceSummary {
            name: name.to_string(),
            keys: group.keys().cloned().collect(),
        })
        .collect();

    Json(summaries)
}
