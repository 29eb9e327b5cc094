//! Text-Generation Client
//!
//! HTTP client for the local Ollama endpoint. The service is treated as
//! untrusted and unreliable: every failure cause gets its own variant, and
//! every variant routes the caller to the deterministic fallback path.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use mailgen_utils::GenerationConfig;

/// Why a generation call failed. All variants map to the same fallback
/// constructor in the generator, making "the caller always receives a
/// usable email" explicit in the types.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("text generation timed out")]
    Timeout,

    #[error("text generation returned status {status}")]
    Http { status: u16 },

    #[error("text generation request failed: {message}")]
    Network { message: String },

    #[error("text generation returned a malformed response: {message}")]
    Malformed { message: String },
}

impl From<reqwest::Error> for GenerationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Malformed {
                message: error.to_string(),
            }
        } else {
            Self::Network {
                message: error.to_string(),
            }
        }
    }
}

/// Client for the Ollama `/api/generate` endpoint.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

impl OllamaClient {
    pub fn new(config: &GenerationConfig) -> Self {
        let client = Client::builder()
            // Slow calls run to this bound and are then treated as failures;
            // there is no cancellation propagation.
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.ollama_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        }
    }

    #[allow(dead_code)]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate raw text for a prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                top_p: self.top_p,
                max_tokens: self.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Http {
                status: status.as_u16(),
            });
        }

        let parsed: GenerateResponse =
            response.json().await.map_err(|e| GenerationError::Malformed {
                message: e.to_string(),
            })?;

        Ok(parsed.response.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let config = GenerationConfig::default();
        let client = OllamaClient::new(&config);
        assert_eq!(client.model(), "qwen2.5:0.5b");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_network_error() {
        let config = GenerationConfig {
            // Reserved port; connections are refused immediately.
            ollama_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let client = OllamaClient::new(&config);

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Network { .. } | GenerationError::Timeout
        ));
    }
}
