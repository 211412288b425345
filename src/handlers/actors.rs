//! Actor controller. Same shape as the movie controller, except the
//! get-by-id path goes through the cross-partition by-id query rather than
//! the point read.

use crate::error::AppError;
use crate::handlers::{force_path_id, to_document, validated_body};
use crate::models::{Actor, DocType};
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
    pub q: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("get all actors");
    let spec = QuerySpec::list(DocType::Actor, params.q.as_deref());
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
            tracing::error!(error = %e, "actor list query failed");
            AppError::Upstream("Failed to get all actors".into())
        })?;
    Ok(Json(results))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("get actor by id");
    let spec = QuerySpec::by_id(DocType::Actor, &id);
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
            tracing::error!(error = %e, id, "actor by-id query failed");
            AppError::Upstream("Internal Server Error".into())
        })?;
    match results.into_iter().next() {
        Some(doc) => Ok(Json(doc)),
        None => Err(AppError::NotFound("Not Found".into())),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("create actor");
    let mut actor: Actor = validated_body(body, Actor::rules())?;
    actor.prepare();
    let stored = state
        .store
        .upsert(&state.database, &state.collection, to_document(&actor)?)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "actor create failed");
            AppError::Upstream("Failed to create actor".into())
        })?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("update actor");
    let body = force_path_id(body, &id, "actorId")?;
    let mut actor: Actor = validated_body(body, Actor::rules())?;
    actor.prepare();
    let stored = state
        .store
        .upsert(&state.database, &state.collection, to_document(&actor)?)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "actor update failed");
            AppError::Upstream("Failed to update actor".into())
        })?;
    Ok((StatusCode::ACCEPTED, Json(stored)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.telemetry.track_event("delete actor");
    match state
        .store
        .delete(&state.database, &state.collection, &id)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound { .. }) => {
            Err(AppError::NotFound("An Actor with that ID does not exist".into()))
        }
        Err(e) => {
            tracing::error!(error = %e, id, "actor delete failed");
            Err(AppError::Upstream(e.to_string()))
        }
    }
}
