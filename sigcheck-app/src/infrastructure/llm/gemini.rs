use super::prompt::build_verification_prompt;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::domain::SignaturePair;
use sigcheck_errors::AppError;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
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
        let request = GenerateContentRequest::new(
            prompt,
            &pair.first.base64_data,
            &pair.second.base64_data,
        );

        let response = self
            .http_client
            .post(GEMINI_API_URL)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini error: {} - {}", status, body);
            return Err(AppError::ProviderError(format!("API error: {}", status)));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderError(e.to_string()))?;

        completion
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| AppError::ProviderError("No response from AI".to_string()))
    }
}

pub(super) fn map_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Timeout
    } else {
        AppError::ProviderError(e.to_string())
    }
}
