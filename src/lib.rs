//! Marquee: REST API over a partitioned document store for a movie catalog.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod validation;

pub use config::{EnvSecrets, SecretSource, Settings};
pub use error::{AppError, ConfigError};
pub use models::{Actor, DocType, Movie};
pub use query::{QueryParam, QueryShape, QuerySpec};
pub use routes::api_routes;
pub use state::AppState;
pub use store::{DocumentStore, MemoryStore, MongoStore, QueryOptions, StoreError};
pub use telemetry::{Telemetry, TracingTelemetry};
