use super::gemini::map_transport_error;
use super::prompt::build_verification_prompt;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::domain::SignaturePair;
use sigcheck_errors::AppError;

const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";
const MODEL: &str = "sonar-pro";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct PerplexityClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl PerplexityClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            api_key,
        }
    }

    pub async fn compare_signatures(&self, pair: &SignaturePair) -> Result<String, AppError> {
        let prompt = build_verification_prompt();
        let request = ChatCompletionRequest::new(
            MODEL,
            prompt,
            &pair.first.base64_data,
            &pair.second.base64_data,
        );

        let response = self
            .http_client
            .post(PERPLEXITY_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Perplexity error: {} - {}", status, body);
            return Err(AppError::ProviderError(format!("API error: {}", status)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderError(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| AppError::ProviderError("No response from AI".to_string()))
    }
}
