use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;
use crate::store::{newest_first, LogStore};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/assignments", get(list_assignments))
}

#[derive(Serialize)]
pub struct AssignmentHistory {
    pub count: usize,
    pub results: Vec<Value>,
}

/// Logged results, newest first.
async fn list_assignments(State(state): State<Arc<AppState>>) -> Json<AssignmentHistory> {
    let results = newest_first(state.runner.store().load());

    Json(AssignmentHistory {
        count: results.len(),
        results,
    })
}
