//! Trait definitions for external interactions
//!
//! Infrastructure implementations live in other crates.

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (parley-llm). Calls are
/// blocking; async callers move them onto a blocking thread.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate output constrained to a JSON schema (if supported)
    ///
    /// Providers without structured output fall back to [`generate`](Self::generate).
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;

    /// Model name recorded in logs
    fn model_name(&self) -> &str {
        "llm"
    }
}
