// AI layer: prompt catalog, response normalization, and one module per task.
// All LLM calls go through llm_client; no direct API calls here.

pub mod ats;
pub mod cover_letter;
pub mod enhance;
pub mod generate;
pub mod handlers;
pub mod jd_analysis;
pub mod json_recovery;
pub mod parse;
pub mod prompts;
