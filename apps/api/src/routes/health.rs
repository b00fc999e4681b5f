use axum::Json;
use serde_json::{json, Value};

pub const API_STATUS: &str = "🚀 API Active";
pub const API_VERSION: &str = "2.0";
pub const ENDPOINTS: [&str; 2] = ["/generate-cv", "/generate-letter"];

/// GET /
/// Fixed service description. Never calls the model.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": API_STATUS,
        "version": API_VERSION,
        "endpoints": ENDPOINTS
    }))
}
