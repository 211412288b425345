//! System endpoint: store-connectivity liveness probe.

use crate::error::AppError;
use crate::query::QuerySpec;
use crate::state::AppState;
use crate::store::QueryOptions;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::time::Instant;

pub async fn healthcheck(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("healthcheck called");
    let started = Instant::now();

    let spec = QuerySpec::any_document();
    let result = state
        .store
        .query(
            &state.database,
            &state.collection,
            &spec,
            QueryOptions::default(),
        )
        .await;
    state.telemetry.track_duration("healthcheck", started.elapsed());

    match result {
        Ok(_) => Ok(Json(json!({
            "message": "Successfully reached healthcheck endpoint"
        }))),
        Err(e) => {
            tracing::error!(error = %e, "healthcheck probe failed");
            Err(AppError::Upstream(format!(
                "Application failed to reach database: {e}"
            )))
        }
    }
}
