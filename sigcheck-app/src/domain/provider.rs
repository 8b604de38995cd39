use serde::{Deserialize, Serialize};

/// Vision model backend used for the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    Gemini,
    Perplexity,
}

impl Provider {
    /// Parses the form's model-select value. Unknown or missing values
    /// fall back to Gemini, matching the form's default option.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "perplexity" => Self::Perplexity,
            _ => Self::Gemini,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Perplexity => "perplexity",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini 2.0 Flash",
            Self::Perplexity => "Perplexity Sonar Pro",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(Provider::parse("gemini"), Provider::Gemini);
        assert_eq!(Provider::parse("perplexity"), Provider::Perplexity);
        assert_eq!(Provider::parse("PERPLEXITY"), Provider::Perplexity);
        assert_eq!(Provider::parse("  Gemini "), Provider::Gemini);
    }

    #[test]
    fn test_parse_falls_back_to_gemini() {
        assert_eq!(Provider::parse(""), Provider::Gemini);
        assert_eq!(Provider::parse("gpt-4"), Provider::Gemini);
    }
}
