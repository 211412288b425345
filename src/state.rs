//! Shared application state for all routes.

use crate::store::DocumentStore;
use crate::telemetry::Telemetry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub database: String,
    pub collection: String,
    pub telemetry: Arc<dyn Telemetry>,
}
