use std::sync::Arc;
use std::time::Instant;

use tracing::error;

use crate::engine::batch::BatchOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Runs one batch against the shared state. Batches are serialized on
/// `batch_lock` and executed on the blocking pool, since matching is
/// synchronous and touches the filesystem.
pub async fn trigger_batch(state: Arc<AppState>) -> Result<BatchOutcome, AppError> {
    let _guard = state.batch_lock.lock().await;

    let start = Instant::now();
    let worker_state = state.clone();
    let outcome = tokio::task::spawn_blocking(move || worker_state.runner.run_batch())
        .await
        .map_err(|err| AppError::Internal(format!("batch worker failed: {err}")))?;
    let elapsed = start.elapsed().as_secs_f64();

    match outcome {
        Ok(outcome) => {
            state.metrics.record_batch("success", elapsed);
            state
                .metrics
                .record_results(&outcome.results, outcome.volunteers_remaining);
            Ok(outcome)
        }
        Err(err) => {
            state.metrics.record_batch("error", elapsed);
            error!(error = %err, "batch failed");
            Err(err)
        }
    }
}
