use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::engine::trigger::trigger_batch;
use crate::error::AppError;
use crate::models::assignment::AssignmentResult;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/run", post(run_batch))
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub message: &'static str,
    pub count: usize,
    pub results: Vec<AssignmentResult>,
}

async fn run_batch(State(state): State<Arc<AppState>>) -> Result<Json<BatchResponse>, AppError> {
    let outcome = trigger_batch(state).await?;

    Ok(Json(BatchResponse {
        message: "Batch matching complete.",
        count: outcome.results.len(),
        results: outcome.results,
    }))
}
