use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Both signature files are required")]
    MissingUpload,

    #[error("Failed to reach the AI provider: {0}")]
    ProviderError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("Invalid upload") {
            Ok(AppError::InvalidUpload(s.to_string()))
        } else if s.contains("signature files are required") {
            Ok(AppError::MissingUpload)
        } else if s.starts_with("Failed to reach") {
            Ok(AppError::ProviderError(s.to_string()))
        } else if s.contains("timeout") {
            Ok(AppError::Timeout)
        } else {
            Ok(AppError::Internal(s.to_string()))
        }
    }
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidUpload(_) => "Invalid file type. Please upload JPG or PNG images.",
            Self::MissingUpload => "Both signature files are required.",
            Self::ProviderError(_) => "The AI service is unavailable. Please try again later.",
            Self::Timeout => "The request took too long. Please try again.",
            Self::Internal(_) => "Something went wrong on the server. Please try again later.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_display() {
        let err = AppError::InvalidUpload("'sig.gif' is not a PNG or JPG file".to_string());
        let parsed: AppError = err.to_string().parse().unwrap();
        assert!(matches!(parsed, AppError::InvalidUpload(_)));

        let parsed: AppError = AppError::MissingUpload.to_string().parse().unwrap();
        assert!(matches!(parsed, AppError::MissingUpload));

        let parsed: AppError = AppError::Timeout.to_string().parse().unwrap();
        assert!(matches!(parsed, AppError::Timeout));
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = AppError::Internal("db handle poisoned".to_string());
        assert!(!err.user_message().contains("poisoned"));
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let (status, message) = match &self {
                AppError::InvalidUpload(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                AppError::MissingUpload => {
                    (StatusCode::BAD_REQUEST, self.user_message().to_string())
                }
                AppError::ProviderError(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
                AppError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "Timeout".to_string()),
                AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            };
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}
