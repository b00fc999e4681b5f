//! Startup-time model selection.
//!
//! Runs once per process. Never fails: a listing error or an account with no
//! capable model falls back to `DEFAULT_MODEL`.

use tracing::{info, warn};

use super::{GeminiClient, LlmError, ModelInfo};

/// Preferred models, best first.
pub const MODEL_PRIORITY: [&str; 3] = [
    "models/gemini-1.5-flash",
    "models/gemini-1.5-pro",
    "models/gemini-pro",
];

/// Used when the listing call fails or returns nothing usable.
pub const DEFAULT_MODEL: &str = "models/gemini-pro";

/// Picks a model from a `models.list` outcome.
///
/// 1. first entry of `MODEL_PRIORITY` that is a capable model
/// 2. otherwise the first capable model, in listing order
/// 3. otherwise `DEFAULT_MODEL`
pub fn select_model(listing: Result<Vec<ModelInfo>, LlmError>) -> String {
    let models = match listing {
        Ok(models) => models,
        Err(e) => {
            warn!("Model listing failed, falling back to {DEFAULT_MODEL}: {e}");
            return DEFAULT_MODEL.to_string();
        }
    };

    let capable: Vec<&str> = models
        .iter()
        .filter(|m| m.supports_generate_content())
        .map(|m| m.name.as_str())
        .collect();

    if let Some(preferred) = MODEL_PRIORITY.iter().find(|p| capable.contains(*p)) {
        return preferred.to_string();
    }

    match capable.first() {
        Some(first) => first.to_string(),
        None => {
            warn!("No model supports generateContent, falling back to {DEFAULT_MODEL}");
            DEFAULT_MODEL.to_string()
        }
    }
}

/// Binds `client` to the best available model. When `pinned` is set the
/// listing call is skipped entirely.
pub async fn select_client(client: GeminiClient, pinned: Option<&str>) -> GeminiClient {
    let model = match pinned {
        Some(model) => {
            info!("Using pinned model {model}");
            model.to_string()
        }
        None => select_model(client.list_models().await),
    };

    client.with_model(model)
}
