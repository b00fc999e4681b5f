// Shared prompt fragments.
// Each generation flow defines its own templates in generation/prompts.rs;
// this file holds the pieces they have in common.

/// Role statement placed at the top of every prompt.
pub const EXPERT_PERSONA: &str =
    "You are an internationally recognised HR expert and professional career writer.";

/// Appended to prompts whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "IMPORTANT: Return ONLY the JSON object. \
    No markdown, no code fences, no text before or after it.";

/// Appended to prompts whose answer is returned as prose.
pub const PLAIN_TEXT_INSTRUCTION: &str = "IMPORTANT: Return ONLY the text of the letter, \
    without a closing salutation (it is added automatically). No markdown, no code fences.";
