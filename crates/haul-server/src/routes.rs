use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};

use haul_core::{LookupRequest, Renderer};

use crate::dto::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Build the full router with all routes.
pub fn router<R>(state: Arc<AppState<R>>) -> Router
where
    R: Renderer + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(lookup::<R>))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub async fn lookup<R>(
    State(state): State<Arc<AppState<R>>>,
    axum::Json(body): axum::Json<LookupRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Renderer + 'static,
{
    let result = state.service.lookup_best_seller(&body).await?;
    Ok(axum::Json(result))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse { status: "healthy" })
}
