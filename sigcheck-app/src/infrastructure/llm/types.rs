use serde::{Deserialize, Serialize};

// Gemini generateContent wire format.

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: String,
}

impl GenerateContentRequest {
    pub fn new(prompt: String, first_b64: &str, second_b64: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::inline_image(first_b64),
                    Part::inline_image(second_b64),
                ],
            }],
        }
    }
}

impl Part {
    fn inline_image(b64: &str) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/png".to_string(),
                data: b64.to_string(),
            },
        }
    }
}

// Perplexity chat completions wire format (multimodal content parts).

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: MessageContent,
}

#[derive(Debug, Deserialize)]
pub struct MessageContent {
    pub content: String,
}

impl ChatCompletionRequest {
    pub fn new(model: &str, prompt: String, first_b64: &str, second_b64: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::image(first_b64),
                    ContentPart::image(second_b64),
                ],
            }],
        }
    }
}

impl ContentPart {
    fn image(b64: &str) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:image/png;base64,{}", b64),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_request_shape() {
        let request = GenerateContentRequest::new("compare".to_string(), "AAAA", "BBBB");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "compare");
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "image/png"
        );
        assert_eq!(json["contents"][0]["parts"][2]["inline_data"]["data"], "BBBB");
    }

    #[test]
    fn test_perplexity_request_shape() {
        let request = ChatCompletionRequest::new("sonar-pro", "compare".to_string(), "AAAA", "BBBB");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "sonar-pro");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
    }
}
