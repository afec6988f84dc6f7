//! Prompt assembly for the generation boundary

mod prompt;

pub use prompt::{PromptBuilder, DECLINE_PHRASE};
