//! Google Gemini tutor backend

use super::error::TutorError;
use super::prompt::SYSTEM_INSTRUCTION;
use super::TutorService;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model used when the configuration names none.
pub const DEFAULT_TUTOR_MODEL: &str = "gemini-3-flash-preview";

const DEFAULT_TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Gemini tutor backend.
#[derive(Debug, Clone)]
pub struct TutorConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Optional gateway base URL; in gateway mode the key stays out of
    /// the request URL and the gateway handles authentication.
    pub gateway: Option<String>,
    pub temperature: f32,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_TUTOR_MODEL.to_string(),
            gateway: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl TutorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            model: std::env::var("TUTOR_MODEL").unwrap_or(defaults.model),
            gateway: std::env::var("TUTOR_GATEWAY").ok(),
            temperature: defaults.temperature,
        }
    }
}

/// Gemini tutor implementation
#[derive(Debug)]
pub struct GeminiTutor {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model_id: String,
    temperature: f32,
}

impl GeminiTutor {
    pub fn new(config: &TutorConfig) -> Result<Self, TutorError> {
        if config.api_key.is_none() && config.gateway.is_none() {
            return Err(TutorError::auth(
                "no API key configured; set GEMINI_API_KEY",
            ));
        }

        let base_url = match &config.gateway {
            Some(gateway) => format!(
                "{}/models/{}:generateContent",
                gateway.trim_end_matches('/'),
                config.model
            ),
            None => format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                config.model
            ),
        };

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TutorError::unknown(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            // In gateway mode the key never rides along in the URL.
            api_key: if config.gateway.is_some() {
                None
            } else {
                config.api_key.clone()
            },
            base_url,
            model_id: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn request_body(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(SYSTEM_INSTRUCTION.to_string()),
                }],
            }),
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.temperature,
            }),
        }
    }

    fn extract_text(resp: GeminiResponse) -> Result<String, TutorError> {
        let candidate = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| TutorError::unknown("no candidates in response"))?;

        Ok(candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join(""))
    }

    fn classify_status(status: u16, message: String) -> TutorError {
        match status {
            400 => TutorError::invalid_request(format!("invalid request: {message}")),
            401 | 403 => TutorError::auth(format!("authentication failed: {message}")),
            429 => TutorError::rate_limit(format!("rate limit exceeded: {message}")),
            500..=599 => TutorError::server_error(format!("server error: {message}")),
            _ => TutorError::unknown(format!("HTTP {status}: {message}")),
        }
    }
}

#[async_trait]
impl TutorService for GeminiTutor {
    async fn explain(&self, prompt: &str) -> Result<String, TutorError> {
        let request = self.request_body(prompt);

        let url = match &self.api_key {
            Some(key) => format!("{}?key={}", self.base_url, key),
            None => self.base_url.clone(),
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TutorError::network(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    TutorError::network(format!("connection failed: {e}"))
                } else {
                    TutorError::unknown(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TutorError::network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                return Err(Self::classify_status(
                    status.as_u16(),
                    error_resp.error.message,
                ));
            }
            return Err(TutorError::unknown(format!("HTTP {status} error: {body}")));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| TutorError::unknown(format!("failed to parse response: {e}")))?;

        Self::extract_text(gemini_response)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiApiError,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::TutorErrorKind;

    fn test_config() -> TutorConfig {
        TutorConfig {
            api_key: Some("test-key".to_string()),
            ..TutorConfig::default()
        }
    }

    #[test]
    fn request_body_carries_prompt_system_instruction_and_temperature() {
        let tutor = GeminiTutor::new(&test_config()).unwrap();
        let body = serde_json::to_value(tutor.request_body("Explain why 5 + 3 equals 8.")).unwrap();

        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Explain why 5 + 3 equals 8."
        );
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );
        assert!(
            (body["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6
        );
    }

    #[test]
    fn extract_text_joins_candidate_parts() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "Adding 5 and 3 "}, {"text": "gives 8."}]
                    },
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 9}
            }"#,
        )
        .unwrap();

        assert_eq!(
            GeminiTutor::extract_text(resp).unwrap(),
            "Adding 5 and 3 gives 8."
        );
    }

    #[test]
    fn extract_text_without_candidates_is_an_error() {
        let resp: GeminiResponse = serde_json::from_str("{}").unwrap();
        let err = GeminiTutor::extract_text(resp).unwrap_err();
        assert_eq!(err.kind, TutorErrorKind::Unknown);
    }

    #[test]
    fn status_codes_classify_errors() {
        let cases = [
            (400, TutorErrorKind::InvalidRequest),
            (401, TutorErrorKind::Auth),
            (403, TutorErrorKind::Auth),
            (429, TutorErrorKind::RateLimit),
            (500, TutorErrorKind::ServerError),
            (503, TutorErrorKind::ServerError),
            (418, TutorErrorKind::Unknown),
        ];
        for (status, kind) in cases {
            let err = GeminiTutor::classify_status(status, "boom".to_string());
            assert_eq!(err.kind, kind, "status {status}");
        }
    }

    #[test]
    fn missing_key_is_an_auth_error() {
        let err = GeminiTutor::new(&TutorConfig::default()).unwrap_err();
        assert_eq!(err.kind, TutorErrorKind::Auth);
    }

    #[test]
    fn direct_mode_builds_the_google_endpoint() {
        let tutor = GeminiTutor::new(&test_config()).unwrap();
        assert_eq!(
            tutor.base_url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        assert_eq!(tutor.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn gateway_mode_leaves_the_key_out_of_the_url() {
        let config = TutorConfig {
            gateway: Some("https://gateway.example/llm/".to_string()),
            ..test_config()
        };
        let tutor = GeminiTutor::new(&config).unwrap();
        assert_eq!(
            tutor.base_url,
            "https://gateway.example/llm/models/gemini-3-flash-preview:generateContent"
        );
        assert!(tutor.api_key.is_none());
    }
}
