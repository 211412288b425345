//! Router assembly for the /api surface.

use crate::handlers::{actors, genres, movies, system};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/actors", get(actors::list).post(actors::create))
        .route(
            "/api/actors/:id",
            get(actors::get_by_id)
                .put(actors::update)
                .delete(actors::delete),
        )
        .route("/api/movies", get(movies::list).post(movies::create))
        .route(
            "/api/movies/:id",
            get(movies::get_by_id)
                .put(movies::update)
                .delete(movies::delete),
        )
        .route("/api/genres", get(genres::list))
        .route("/api/healthz", get(system::healthcheck))
        .with_state(state)
}
