use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Layout used when the client does not pick one (classic, modern, bold).
pub const DEFAULT_LETTER_STYLE: &str = "classic";

/// Request body for `POST /generate-letter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterRequest {
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    pub target_job: String,
    pub company_name: String,
    pub motivation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub background: String,
    #[serde(default)]
    pub template_style: Option<String>,
}

impl LetterRequest {
    pub fn template_style(&self) -> &str {
        self.template_style
            .as_deref()
            .unwrap_or(DEFAULT_LETTER_STYLE)
    }
}

/// Response body for `POST /generate-letter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterResult {
    pub content: String,
}
