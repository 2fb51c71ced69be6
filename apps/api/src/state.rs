use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::GenClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: GenClient,
    pub config: Config,
}
