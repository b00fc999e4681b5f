//! CV generation: prompt → model → JSON extraction.

use serde_json::Value;
use tracing::{debug, info};

use crate::generation::extract::{extract_cv, GenerationError};
use crate::generation::prompts::build_cv_prompt;
use crate::llm_client::TextGenerator;
use crate::models::cv::{CvRequest, CvResult};

pub async fn generate_cv(
    llm: &dyn TextGenerator,
    request: &CvRequest,
) -> Result<CvResult, GenerationError> {
    let prompt = build_cv_prompt(request);
    info!(
        "Generating CV for target job {:?} with {}",
        request.target_job,
        llm.model()
    );

    let raw = llm.generate(&prompt).await?;
    debug!("CV model output: {} chars", raw.len());

    let cv = extract_cv(&raw)?;
    info!(
        "CV generated: {} experience entries, {} education entries, {} skills",
        entry_count(&cv.experience),
        entry_count(&cv.education),
        entry_count(&cv.skills)
    );
    Ok(cv)
}

fn entry_count(value: &Value) -> usize {
    value.as_array().map_or(0, Vec::len)
}
