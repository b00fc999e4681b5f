//! Response extraction — turns free-form model output into structured data.
//!
//! The model is asked for bare JSON but routinely wraps it in code fences or
//! surrounds it with prose. `extract_cv` tolerates both; `clean_letter` only
//! peels one fence line off each end of a letter.

use std::ops::Range;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::cv::CvResult;

const FENCE: &str = "```";

/// Why a CV could not be produced. One variant per failure kind so callers
/// can branch without inspecting messages.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("upstream model call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("no JSON object found in the model response")]
    NoJson,

    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("incomplete JSON structure, missing: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
}

/// Top-level CV keys as the model sent them. A key is missing only when it
/// is absent; any value, `null` included, counts as present.
#[derive(Debug, Deserialize)]
struct PartialCv {
    #[serde(default, deserialize_with = "present")]
    summary: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    experience: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    education: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    skills: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl PartialCv {
    fn into_result(self) -> Result<CvResult, GenerationError> {
        let mut missing = Vec::new();
        if self.summary.is_none() {
            missing.push("summary");
        }
        if self.experience.is_none() {
            missing.push("experience");
        }
        if self.education.is_none() {
            missing.push("education");
        }
        if self.skills.is_none() {
            missing.push("skills");
        }

        match (self.summary, self.experience, self.education, self.skills) {
            (Some(summary), Some(experience), Some(education), Some(skills)) => Ok(CvResult {
                summary,
                experience,
                education,
                skills,
            }),
            _ => Err(GenerationError::MissingKeys(missing)),
        }
    }
}

/// Parses a `CvResult` out of raw model output.
///
/// Candidate objects are tried left to right, so a stray `{...}` in the prose
/// before the payload is skipped. The first complete CV wins; otherwise the
/// first incomplete object is reported, then the first syntax error.
pub fn extract_cv(raw: &str) -> Result<CvResult, GenerationError> {
    let text = strip_code_fences(raw);
    let mut incomplete = None;
    let mut malformed = None;

    for candidate in json_object_candidates(text) {
        match serde_json::from_str::<PartialCv>(candidate) {
            Ok(partial) => match partial.into_result() {
                Ok(cv) => return Ok(cv),
                Err(e) => {
                    incomplete.get_or_insert(e);
                }
            },
            Err(e) => {
                malformed.get_or_insert(GenerationError::Parse(e));
            }
        }
    }

    Err(incomplete.or(malformed).unwrap_or(GenerationError::NoJson))
}

/// Removes an opening fence (with optional language tag such as `json`) and a
/// closing fence, ignoring surrounding whitespace.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        text = rest[tag_len..].trim_start();
    }

    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest.trim_end();
    }

    text
}

/// Every top-level `{ ... }` span in `text`, left to right. Each search
/// resumes after the previous span, so nested objects are never yielded on
/// their own.
pub fn json_object_candidates(text: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut offset = 0;

    while let Some(span) = object_span(&text[offset..]) {
        let (start, end) = (offset + span.start, offset + span.end);
        candidates.push(&text[start..end]);
        offset = end;
    }

    candidates
}

/// Byte range of the object opening at the first `{`.
///
/// Scans for the matching `}` while skipping braces inside string literals.
/// When the object is never closed the widest `{ ... }` span is returned so
/// the parser reports the syntax error.
fn object_span(text: &str) -> Option<Range<usize>> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start..start + offset + 1);
                }
            }
            _ => {}
        }
    }

    let end = text.rfind('}')?;
    (end > start).then(|| start..end + 1)
}

/// Trims a letter and drops at most one leading fence line and one trailing
/// fence. Everything else is returned verbatim.
pub fn clean_letter(raw: &str) -> String {
    let mut text = raw.trim();

    if text.starts_with(FENCE) {
        if let Some(newline) = text.find('\n') {
            text = &text[newline + 1..];
        }
    }

    if let Some(rest) = text.strip_suffix("\n```") {
        text = rest;
    }

    text.to_string()
}
