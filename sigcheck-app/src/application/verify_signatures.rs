use crate::domain::{Provider, SignaturePair, Verdict};
use crate::infrastructure::llm::{GeminiClient, PerplexityClient};
use sigcheck_errors::AppError;

/// Runs one signature comparison against the selected provider.
pub struct VerifySignatures {
    gemini: Option<GeminiClient>,
    perplexity: Option<PerplexityClient>,
}

impl VerifySignatures {
    pub fn new(gemini_api_key: Option<String>, perplexity_api_key: Option<String>) -> Self {
        Self {
            gemini: gemini_api_key.map(GeminiClient::new),
            perplexity: perplexity_api_key.map(PerplexityClient::new),
        }
    }

    pub async fn execute(
        &self,
        provider: Provider,
        pair: SignaturePair,
    ) -> Result<Verdict, AppError> {
        tracing::info!(
            "Comparing '{}' and '{}' via {}",
            pair.first.filename,
            pair.second.filename,
            provider.as_str()
        );

        let report_text = match provider {
            Provider::Gemini => {
                self.backend(self.gemini.as_ref(), "GEMINI_API_KEY")?
                    .compare_signatures(&pair)
                    .await?
            }
            Provider::Perplexity => {
                self.backend(self.perplexity.as_ref(), "PERPLEXITY_API_KEY")?
                    .compare_signatures(&pair)
                    .await?
            }
        };

        Ok(Verdict::new(provider, report_text))
    }

    fn backend<'a, C>(&self, client: Option<&'a C>, key_name: &str) -> Result<&'a C, AppError> {
        client.ok_or_else(|| {
            AppError::ProviderError(format!("{} is not configured on this server", key_name))
        })
    }
}
