//! Parley LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `parley-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: scripted responses for tests and dry runs
//! - `OllamaProvider`: local Ollama API with JSON output mode
//!
//! # Examples
//!
//! ```
//! use parley_llm::MockProvider;
//! use parley_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::with_responses(["first", "second"]);
//! assert_eq!(provider.generate("a").unwrap(), "first");
//! assert_eq!(provider.generate("b").unwrap(), "second");
//! assert_eq!(provider.prompts(), vec!["a", "b"]);
//! ```

#![warn(missing_docs)]

pub mod ollama;

use parley_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Default)]
struct Script {
    queue: VecDeque<Result<String, String>>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Queued responses are returned in order, one per call; once the queue is
/// empty every call gets the fallback response. Clones share the queue and
/// the prompt log.
///
/// ```
/// use parley_llm::{LlmError, MockProvider};
/// use parley_domain::traits::LlmProvider;
///
/// let provider = MockProvider::new("fallback");
/// provider.push_error("offline");
/// assert!(matches!(provider.generate("x"), Err(LlmError::Other(_))));
/// assert_eq!(provider.generate("x").unwrap(), "fallback");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    fallback: String,
    script: Arc<Mutex<Script>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            fallback: response.into(),
            script: Arc::new(Mutex::new(Script::default())),
        }
    }

    /// Create a MockProvider that answers with `responses` in order
    ///
    /// The last response doubles as the fallback.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue: VecDeque<Result<String, String>> =
            responses.into_iter().map(|r| Ok(r.into())).collect();
        let fallback = queue
            .back()
            .and_then(|last| last.as_ref().ok().cloned())
            .unwrap_or_default();
        let provider = Self::new(fallback);
        provider.lock().queue = queue;
        provider
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a response for a later call
    pub fn push_response(&self, response: impl Into<String>) {
        self.lock().queue.push_back(Ok(response.into()));
    }

    /// Queue a failure for a later call
    pub fn push_error(&self, message: impl Into<String>) {
        self.lock().queue.push_back(Err(message.into()));
    }

    /// Every prompt received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.lock().prompts.len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut script = self.lock();
        script.prompts.push(prompt.to_string());
        match script.queue.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LlmError::Other(message)),
            None => Ok(self.fallback.clone()),
        }
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
