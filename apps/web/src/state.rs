use std::sync::Arc;

use crate::config::Config;
use crate::upstream::api::JobApi;
use crate::views::Templates;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Upstream job API. `HttpJobApi` in production, a fake in handler tests.
    pub jobs: Arc<dyn JobApi>,
    pub templates: Arc<Templates>,
}
