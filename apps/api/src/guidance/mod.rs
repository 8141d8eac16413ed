// Career guidance: prompt templates, completion-backed actions, response structuring.
// All completion calls go through llm_client, never direct HTTP calls here.

pub mod advisor;
pub mod handlers;
pub mod prompts;
pub mod structurer;
