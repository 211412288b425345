//! Movie controller: list (with substring filter), point read, create,
//! update, delete.

use crate::error::AppError;
use crate::handlers::{force_path_id, to_document, validated_body};
use crate::models::{DocType, Movie};
use crate::query::QuerySpec;
use crate::state::AppState;
use crate::store::{QueryOptions, StoreError};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
pub struct ListParams {
    /// Optional substring filter against `textSearch`.
    pub q: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("get all movies");
    let spec = QuerySpec::list(DocType::Movie, params.q.as_deref());
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
            tracing::error!(error = %e, "movie list query failed");
            AppError::Upstream("Failed to get all movies".into())
        })?;
    Ok(Json(results))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("get movie by id");
    // id is not the partition key, so the point read fans out; the hint is a
    // placeholder.
    let document = state
        .store
        .get_by_id(&state.database, &state.collection, "0", &id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "movie point read failed");
            AppError::Upstream("Internal Server Error".into())
        })?;
    match document {
        Some(doc) => Ok(Json(doc)),
        None => Err(AppError::NotFound("Not Found".into())),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("create movie");
    let mut movie: Movie = validated_body(body, Movie::rules())?;
    movie.prepare();
    let stored = state
        .store
        .upsert(&state.database, &state.collection, to_document(&movie)?)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "movie create failed");
            AppError::Upstream("Failed to create movie".into())
        })?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("update movie");
    let body = force_path_id(body, &id, "movieId")?;
    let mut movie: Movie = validated_body(body, Movie::rules())?;
    movie.prepare();
    let stored = state
        .store
        .upsert(&state.database, &state.collection, to_document(&movie)?)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "movie update failed");
            AppError::Upstream("Failed to update movie".into())
        })?;
    Ok((StatusCode::ACCEPTED, Json(stored)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("delete movie");
    match state
        .store
        .delete(&state.database, &state.collection, &id)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound { .. }) => {
            Err(AppError::NotFound("A Movie with that ID does not exist".into()))
        }
        Err(e) => {
            tracing::error!(error = %e, id, "movie delete failed");
            Err(AppError::Upstream(e.to_string()))
        }
    }
}
