use axum::extract::State;
use std::sync::Arc;

use super::{ApiError, AppState};

/// `GET /_ping`
pub async fn ping(State(state): State<Arc<AppState>>) -> Result<&'static str, ApiError> {
    state.store().ping().await?;
    Ok("PONG")
}
