//! Parley Generator
//!
//! Produces validated negotiation-analysis records from source clauses using
//! an LLM.
//!
//! # Architecture
//!
//! ```text
//! SourceClause → prompt → LLM → Gatekeeper ─accept→ Record
//!                           ↑        │
//!                           └─repair─┘ (bounded attempts)
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use parley_generator::{Generator, GeneratorConfig};
//! use parley_gatekeeper::{Gatekeeper, ValidationConfig};
//! use parley_llm::OllamaProvider;
//!
//! # async fn example(clause: parley_domain::SourceClause) -> Result<(), Box<dyn std::error::Error>> {
//! let llm = OllamaProvider::default_endpoint("llama3.1");
//! let gatekeeper = Gatekeeper::new(ValidationConfig::loose());
//! let generator = Generator::new(llm, gatekeeper, GeneratorConfig::default())?;
//!
//! let generated = generator.generate(&clause).await?;
//! println!("{} after {} attempt(s)", generated.record.clause_hash, generated.attempts);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod generator;
mod parser;
mod prompt;
mod schema;

#[cfg(test)]
mod tests;

pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use generator::{Generated, Generator};
pub use parser::extract_json;
pub use prompt::{observer_hints, repair_prompt, PromptBuilder};
pub use schema::analysis_schema;
