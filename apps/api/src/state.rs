use std::sync::Arc;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model client selected once at startup; read-only afterwards.
    pub llm: Arc<dyn TextGenerator>,
}
