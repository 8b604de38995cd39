use crate::application::VerifySignatures;
use crate::infrastructure::security::{CostTracker, RateLimiter};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub verify_signatures: Arc<VerifySignatures>,
    pub rate_limiter: RateLimiter,
    pub cost_tracker: Arc<CostTracker>,
}

impl AppContext {
    pub fn new(gemini_api_key: Option<String>, perplexity_api_key: Option<String>) -> Self {
        Self {
            verify_signatures: Arc::new(VerifySignatures::new(
                gemini_api_key,
                perplexity_api_key,
            )),
            rate_limiter: RateLimiter::new(),
            cost_tracker: Arc::new(CostTracker::new()),
        }
    }

    pub fn from_env() -> Self {
        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        let perplexity_api_key = std::env::var("PERPLEXITY_API_KEY").ok();

        if gemini_api_key.is_none() && perplexity_api_key.is_none() {
            panic!("GEMINI_API_KEY or PERPLEXITY_API_KEY must be set");
        }

        if gemini_api_key.is_some() {
            tracing::info!("Gemini backend enabled");
        }
        if perplexity_api_key.is_some() {
            tracing::info!("Perplexity backend enabled");
        }

        Self::new(gemini_api_key, perplexity_api_key)
    }
}
