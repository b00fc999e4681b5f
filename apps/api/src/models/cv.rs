use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Layout used when the client does not pick one (modern, minimal, creative).
pub const DEFAULT_CV_STYLE: &str = "modern";

/// Request body for `POST /generate-cv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvRequest {
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    pub target_job: String,
    pub experience: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: String,
    #[serde(default)]
    pub template_style: Option<String>,
}

impl CvRequest {
    pub fn template_style(&self) -> &str {
        self.template_style.as_deref().unwrap_or(DEFAULT_CV_STYLE)
    }
}

/// Response body for `POST /generate-cv`.
///
/// Only the presence of the four keys is checked; their values are the
/// model's JSON, passed through exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvResult {
    pub summary: Value,
    pub experience: Value,
    pub education: Value,
    pub skills: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cv_request_optional_fields_default_to_empty() {
        let request: CvRequest = serde_json::from_value(json!({
            "full_name": "Ada Lovelace",
            "target_job": "Analyst",
            "experience": "Worked on the Analytical Engine"
        }))
        .unwrap();

        assert_eq!(request.email, "");
        assert_eq!(request.phone, "");
        assert_eq!(request.address, "");
        assert_eq!(request.education, "");
        assert_eq!(request.skills, "");
        assert_eq!(request.template_style(), "modern");
    }

    #[test]
    fn test_cv_request_null_optional_fields_take_defaults() {
        let request: CvRequest = serde_json::from_value(json!({
            "full_name": "Ada Lovelace",
            "email": null,
            "target_job": "Analyst",
            "experience": "Engines",
            "template_style": null
        }))
        .unwrap();

        assert_eq!(request.email, "");
        assert_eq!(request.template_style(), DEFAULT_CV_STYLE);
    }

    #[test]
    fn test_cv_request_requires_target_job() {
        let result: Result<CvRequest, _> = serde_json::from_value(json!({
            "full_name": "Ada Lovelace",
            "experience": "Engines"
        }));
        assert!(result.is_err());
    }
}
