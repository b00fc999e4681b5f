// CV and cover-letter generation.
// All model calls go through llm_client::TextGenerator.

pub mod cv;
pub mod extract;
pub mod handlers;
pub mod letter;
pub mod prompts;
