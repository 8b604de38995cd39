mod gemini;
mod perplexity;
mod prompt;
mod types;

pub use gemini::GeminiClient;
pub use perplexity::PerplexityClient;
pub use prompt::build_verification_prompt;
