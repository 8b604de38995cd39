pub mod llm;
pub mod security;
