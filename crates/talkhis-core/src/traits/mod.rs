//! Core traits for talkhis providers.

mod llm;

pub use llm::*;
