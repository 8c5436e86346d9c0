// Content Requester: prompt in, validated LabReportRecord out.
// All network calls go through llm_client::ContentService.

pub mod prompts;
pub mod requester;

pub use requester::{fetch_record, GenerationSettings};
