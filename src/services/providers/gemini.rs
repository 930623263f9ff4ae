//! Gemini text generator (Google Generative Language API)
//!
//! Asks the model for a JSON answer (`responseMimeType: application/json`) and
//! returns the text of the first candidate untouched. Rate limiting is told
//! apart from other failures so the user sees the "service busy" message.

use crate::{
    error::{AppError, AppResult},
    models::{
        GeminiContent, GeminiErrorBody, GeminiGenerationConfig, GeminiPart, GeminiRequest,
        GeminiResponse,
    },
    services::providers::TextGenerator,
};
use reqwest::{Client as HttpClient, StatusCode};

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";
const RATE_LIMIT_STATUS: &str = "RESOURCE_EXHAUSTED";

#[derive(Clone)]
pub struct GeminiGenerator {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: JSON_MIME_TYPE.to_string(),
            },
        }
    }
}

/// Whether a failed response means "slow down" rather than a hard failure
fn is_rate_limited(status: StatusCode, body: &str) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }

    serde_json::from_str::<GeminiErrorBody>(body)
        .map(|e| {
            e.error.code == Some(StatusCode::TOO_MANY_REQUESTS.as_u16())
                || e.error.status.as_deref() == Some(RATE_LIMIT_STATUS)
        })
        .unwrap_or(false)
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<GeminiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            format!("Gemini API returned status {}: {}", status, parsed.error.message)
        }
        _ => format!("Gemini API returned status {}: {}", status, body),
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate_json(&self, prompt: &str) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.generate_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(|e| AppError::Generation(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);

            if is_rate_limited(status, &body) {
                tracing::warn!(status = %status, model = %self.model, "Gemini rate limit hit");
                return Err(AppError::RateLimited(message));
            }

            tracing::error!(status = %status, model = %self.model, "Gemini request failed");
            return Err(AppError::Generation(message));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::Generation(e.without_url().to_string()))?;
        tracing::debug!(response = %response_text, "Raw Gemini API response");

        let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize Gemini response"
            );
            AppError::MalformedResponse(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = parsed.first_text().ok_or_else(|| {
            AppError::MalformedResponse("Gemini response has no candidate text".to_string())
        })?;

        tracing::info!(
            model = %self.model,
            prompt_chars = prompt.len(),
            response_chars = text.len(),
            "Text generated"
        );

        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn generator(server: &MockServer) -> GeminiGenerator {
        GeminiGenerator::new(
            "test_key".to_string(),
            server.base_url(),
            "gemini-test".to_string(),
        )
    }

    #[tokio::test]
    async fn test_generate_json_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-test:generateContent")
                    .header("x-goog-api-key", "test_key")
                    .json_body_partial(
                        r#"{"generationConfig": {"responseMimeType": "application/json"}}"#,
                    );
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": {
                            "role": "model",
                            "parts": [{"text": "{\"explanation\": \"Ideal.\"}"}]
                        }
                    }]
                }));
            })
            .await;

        let text = generator(&server).generate_json("prompt").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, r#"{"explanation": "Ideal."}"#);
    }

    #[tokio::test]
    async fn test_generate_json_rate_limited() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(429).json_body(json!({
                    "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
                }));
            })
            .await;

        let err = generator(&server).generate_json("prompt").await.unwrap_err();
        assert!(matches!(err, AppError::RateLimited(msg) if msg.contains("Quota exceeded")));
    }

    #[tokio::test]
    async fn test_generate_json_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(500).body("boom");
            })
            .await;

        let err = generator(&server).generate_json("prompt").await.unwrap_err();
        assert!(matches!(err, AppError::Generation(msg) if msg.contains("boom")));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let generator = GeminiGenerator::new(
            "SUPERSECRETKEY".to_string(),
            "http://127.0.0.1:9".to_string(),
            "gemini-test".to_string(),
        );

        let err = generator.generate_json("prompt").await.unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
        assert!(!err.to_string().contains("SUPERSECRETKEY"));
        assert!(!err.user_message().contains("SUPERSECRETKEY"));
    }

    #[tokio::test]
    async fn test_generate_json_without_candidates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({"candidates": []}));
            })
            .await;

        let err = generator(&server).generate_json("prompt").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn test_is_rate_limited() {
        assert!(is_rate_limited(StatusCode::TOO_MANY_REQUESTS, ""));
        assert!(is_rate_limited(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error": {"message": "busy", "status": "RESOURCE_EXHAUSTED"}}"#
        ));
        assert!(!is_rate_limited(StatusCode::BAD_REQUEST, r#"{"error": {"message": "bad"}}"#));
        assert!(!is_rate_limited(StatusCode::INTERNAL_SERVER_ERROR, "not json"));
    }

    #[test]
    fn test_build_request_shape() {
        let request = GeminiGenerator::build_request("hola");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hola");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }
}
