//! Server binary: resolve config, connect the store, mount routes, serve.
//!
//! Any missing mandatory configuration value propagates out of `main`, so the
//! process exits non-zero before binding the listener.

use marquee::{api_routes, AppState, EnvSecrets, MongoStore, Settings, TracingTelemetry};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("marquee=info".parse()?))
        .init();

    let settings = Settings::from_env(&EnvSecrets)?;
    let store = MongoStore::connect(&settings.store_url, &settings.store_key).await?;

    let state = AppState {
        store: Arc::new(store),
        database: settings.database_name,
        collection: settings.collection_name,
        telemetry: Arc::new(TracingTelemetry),
    };

    let app = api_routes(state).layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
