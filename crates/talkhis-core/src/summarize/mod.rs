//! Academic summarization: prompt construction and the request pipeline.

mod pipeline;
pub mod prompts;

pub use pipeline::{SummaryRequest, Summarizer};
pub use prompts::{build_summary_prompt, ACADEMIC_POLICY, SYSTEM_INSTRUCTION, TEXT_DELIMITER};
