//! Cover-letter generation: prompt → model → fence cleanup.

use tracing::{debug, info};

use crate::generation::extract::clean_letter;
use crate::generation::prompts::build_letter_prompt;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::letter::{LetterRequest, LetterResult};

pub async fn generate_letter(
    llm: &dyn TextGenerator,
    request: &LetterRequest,
) -> Result<LetterResult, LlmError> {
    let prompt = build_letter_prompt(request);
    info!(
        "Generating letter for {:?} at {:?} with {}",
        request.target_job,
        request.company_name,
        llm.model()
    );

    let raw = llm.generate(&prompt).await?;
    debug!("Letter model output: {} chars", raw.len());

    Ok(LetterResult {
        content: clean_letter(&raw),
    })
}
