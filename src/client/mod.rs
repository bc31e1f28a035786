// File: ./src/client/mod.rs
pub mod core;
pub mod llm;

pub use crate::client::core::{SkylightClient, SkylightError};
pub use crate::client::llm::LlmMatcher;
