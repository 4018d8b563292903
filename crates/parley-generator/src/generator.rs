//! Core Generator implementation

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::parser::extract_json;
use crate::prompt::{repair_prompt, PromptBuilder};
use crate::schema::analysis_schema;
use parley_domain::traits::LlmProvider;
use parley_domain::{Record, SourceClause};
use parley_gatekeeper::{ConformanceWarning, Gatekeeper};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// A record that passed validation
#[derive(Debug, Clone)]
pub struct Generated {
    /// The new record
    pub record: Record,
    /// Non-fatal findings on the accepted analysis
    pub warnings: Vec<ConformanceWarning>,
    /// LLM round trips used, the first included
    pub attempts: u32,
    /// Wall time across all attempts
    pub elapsed_ms: u64,
}

/// The Generator turns source clauses into validated records
///
/// One clause is processed at a time: prompt, LLM call, validation, and on
/// rejection a repair prompt naming every violation, up to
/// `max_attempts` round trips. A call that outlives `call_timeout_secs` is
/// reported as [`GeneratorError::Timeout`] only after it has returned.
pub struct Generator<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    gatekeeper: Gatekeeper,
    config: GeneratorConfig,
    schema: String,
}

impl<L> Generator<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new Generator
    pub fn new(
        llm_provider: L,
        gatekeeper: Gatekeeper,
        config: GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        config.validate().map_err(GeneratorError::Config)?;
        Ok(Self {
            llm_provider: Arc::new(llm_provider),
            gatekeeper,
            config,
            schema: analysis_schema().to_string(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a validated record for one clause
    pub async fn generate(&self, clause: &SourceClause) -> Result<Generated, GeneratorError> {
        let started = Instant::now();
        let prompt = PromptBuilder::new(clause)
            .with_legend(self.config.include_legend)
            .build();

        info!(
            "Generating analysis for {} clause ({}) with {}",
            clause.clause_type,
            clause.content_key(),
            self.llm_provider.model_name()
        );
        debug!("Prompt length: {} chars", prompt.len());

        let mut request = prompt.clone();
        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut call = self.spawn_call(&request);
            let response = match timeout(self.config.call_timeout(), &mut call).await {
                Ok(joined) => joined
                    .map_err(|e| GeneratorError::Llm(format!("Task join error: {}", e)))??,
                Err(_) => {
                    // a blocking call cannot be cancelled; let it end so calls never overlap
                    warn!(
                        "LLM call exceeded {}s, waiting for it to finish",
                        self.config.call_timeout_secs
                    );
                    let _ = call.await;
                    return Err(GeneratorError::Timeout(self.config.call_timeout_secs));
                }
            };

            debug!("LLM response length: {} chars", response.len());

            let rejection = match self.gatekeeper.validate_analysis_str(extract_json(&response)) {
                Ok(mut accepted) => {
                    let analysis = &mut accepted.value;
                    if analysis.original_clause.trim() != clause.clause.trim() {
                        debug!("Replacing echoed clause text with the source clause");
                    }
                    analysis.original_clause = clause.clause.clone();
                    let elapsed_ms = started.elapsed().as_millis() as u64;
                    info!(
                        "Accepted after {} attempt(s) with {} warning(s)",
                        attempts,
                        accepted.warnings.len()
                    );
                    return Ok(Generated {
                        record: Record::new(clause.clone(), accepted.value),
                        warnings: accepted.warnings,
                        attempts,
                        elapsed_ms,
                    });
                }
                Err(rejection) => rejection,
            };

            warn!("Attempt {} rejected: {}", attempts, rejection);
            if attempts >= self.config.max_attempts {
                return Err(GeneratorError::RetriesExhausted {
                    attempts,
                    last: rejection,
                });
            }
            request = repair_prompt(&prompt, &response, &rejection, self.config.max_echo_chars);
        }
    }

    /// Run the provider call on the blocking pool
    fn spawn_call(&self, prompt: &str) -> JoinHandle<Result<String, GeneratorError>> {
        let llm = Arc::clone(&self.llm_provider);
        let prompt = prompt.to_string();
        let schema = self.config.structured_output.then(|| self.schema.clone());

        tokio::task::spawn_blocking(move || {
            let response = match schema {
                Some(schema) => llm.generate_structured(&prompt, &schema),
                None => llm.generate(&prompt),
            };
            response.map_err(|e| GeneratorError::Llm(e.to_string()))
        })
    }
}
