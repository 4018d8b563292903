//! Ollama over HTTP
//!
//! Talks to a local Ollama instance over its HTTP API.
//!
//! # Features
//!
//! - Async HTTP communication with the `/api/generate` endpoint
//! - JSON output mode, constrained by a JSON schema when one is given
//! - Retry with exponential backoff on transport and server errors
//! - Blocking `LlmProvider` wrapper for use from `spawn_blocking`
//!
//! # Examples
//!
//! ```no_run
//! use parley_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1")
//!     .with_temperature(0.2);
//! ```

use crate::LlmError;
use parley_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for a single HTTP request; analyses are long
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default number of attempts per call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Client for one model on an Ollama server
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
    temperature: Option<f64>,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f64,
}

/// Body of `POST /api/generate`
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// Failed attempt: worth retrying or not
enum Attempt {
    Transient(LlmError),
    Fatal(LlmError),
}

/// The `format` field for a schema string: the schema itself when it is a
/// JSON object, plain JSON mode otherwise
fn json_format(schema: &str) -> Value {
    match serde_json::from_str::<Value>(schema) {
        Ok(schema @ Value::Object(_)) => schema,
        _ => Value::String("json".to_string()),
    }
}

impl OllamaProvider {
    /// Provider for `model` served at `endpoint`; a trailing slash is ignored
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            temperature: None,
        }
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts per call
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Bound each HTTP request; the default is [`DEFAULT_TIMEOUT_SECS`]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if let Ok(client) = reqwest::Client::builder().timeout(timeout).build() {
            self.client = client;
        }
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Free-text completion
    ///
    /// Transport failures and 5xx responses are retried with backoff; a
    /// missing model or other 4xx fails immediately.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.request(prompt, None).await
    }

    /// Generate output in JSON mode
    ///
    /// `schema` is passed through as Ollama's `format` when it parses as a
    /// JSON object.
    pub async fn generate_json(&self, prompt: &str, schema: &str) -> Result<String, LlmError> {
        self.request(prompt, Some(json_format(schema))).await
    }

    async fn request(&self, prompt: &str, format: Option<Value>) -> Result<String, LlmError> {
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format,
            options: self.temperature.map(|temperature| GenerateOptions { temperature }),
        };

        let mut attempt = 1;
        loop {
            debug!("Ollama request to {} (attempt {})", self.model, attempt);
            let error = match self.send_once(&body).await {
                Ok(text) => return Ok(text),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Transient(e)) => e,
            };
            if attempt >= self.max_retries {
                return Err(error);
            }
            let delay = Duration::from_secs(1 << (attempt - 1));
            warn!("{}; retrying in {:?}", error, delay);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send_once(&self, body: &OllamaGenerateRequest<'_>) -> Result<String, Attempt> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| Attempt::Transient(LlmError::Communication(format!("Request failed: {}", e))))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Attempt::Fatal(LlmError::ModelNotAvailable(self.model.clone())));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let error = LlmError::Communication(format!("HTTP {}: {}", status, detail.trim()));
            return Err(if status.is_server_error() {
                Attempt::Transient(error)
            } else {
                Attempt::Fatal(error)
            });
        }

        let parsed: OllamaGenerateResponse = response.json().await.map_err(|e| {
            Attempt::Fatal(LlmError::InvalidResponse(format!("Unexpected response body: {}", e)))
        })?;
        Ok(parsed.response)
    }

    fn block_on<F>(&self, future: F) -> Result<String, LlmError>
    where
        F: std::future::Future<Output = Result<String, LlmError>>,
    {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?
            .block_on(future)
    }
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.block_on(OllamaProvider::generate(self, prompt))
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        self.block_on(self.generate_json(prompt, schema))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let provider = OllamaProvider::new("http://gpu-box:11434/", "llama3.1");
        assert_eq!(provider.endpoint, "http://gpu-box:11434");
        assert_eq!(provider.model(), "llama3.1");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(provider.temperature, None);
    }

    #[test]
    fn test_ollama_provider_builders() {
        let provider = OllamaProvider::default_endpoint("qwen2.5")
            .with_max_retries(0)
            .with_timeout(Duration::from_secs(5))
            .with_temperature(0.3);
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.max_retries, 1);
        assert_eq!(provider.temperature, Some(0.3));
    }

    #[test]
    fn test_json_format_selection() {
        assert_eq!(json_format("{\"type\": \"object\"}")["type"], "object");
        assert_eq!(json_format("analysis"), Value::String("json".to_string()));
        assert_eq!(json_format("[1]"), Value::String("json".to_string()));
    }

    #[test]
    fn test_request_body_shape() {
        let body = OllamaGenerateRequest {
            model: "m",
            prompt: "p",
            stream: false,
            format: Some(json_format("")),
            options: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["format"], "json");
        assert!(value.get("options").is_none());
    }

    #[tokio::test]
    #[ignore] // needs a running Ollama with llama3.1 pulled
    async fn test_live_json_mode() {
        let provider = OllamaProvider::default_endpoint("llama3.1");
        let text = provider
            .generate_json("Return {\"ok\": true}", "")
            .await
            .unwrap();
        assert!(serde_json::from_str::<Value>(&text).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_communication_error() {
        let provider = OllamaProvider::new("http://127.0.0.1:1", "llama3.1").with_max_retries(1);
        let result = provider.generate("ping").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[test]
    fn test_blocking_wrapper_reports_errors() {
        let provider = OllamaProvider::new("http://127.0.0.1:1", "llama3.1").with_max_retries(1);
        let result = LlmProviderTrait::generate(&provider, "ping");
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
