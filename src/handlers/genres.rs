//! Genre controller: list-only, returns the bare list of genre names.

use crate::error::AppError;
use crate::models::DocType;
use crate::query::QuerySpec;
use crate::state::AppState;
use crate::store::QueryOptions;
use axum::{extract::State, response::IntoResponse, Json};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("get all genres");
    let spec = QuerySpec::values(DocType::Genre, "id");
    let results = state
        .store
        .query(
            &state.database,
            &state.collection,
            &spec,
            QueryOptions::cross_partition(),
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "genre list query failed");
            AppError::Upstream("Failed to get all Genres".into())
        })?;
    Ok(Json(results))
}
