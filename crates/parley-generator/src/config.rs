//! Configuration for the Generator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// LLM round trips per clause, the first included
    pub max_attempts: u32,

    /// Maximum time for a single LLM call (seconds)
    pub call_timeout_secs: u64,

    /// Send the JSON schema of an analysis with each request
    pub structured_output: bool,

    /// Include the notation legend in the prompt
    pub include_legend: bool,

    /// Characters of a rejected response quoted back in a repair prompt
    pub max_echo_chars: usize,
}

impl GeneratorConfig {
    /// Get the call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        if self.call_timeout_secs == 0 {
            return Err("call_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_attempts: 3,
            call_timeout_secs: 300,
            structured_output: true,
            include_legend: true,
            max_echo_chars: 4_000,
        }
    }
}

impl GeneratorConfig {
    /// Aggressive preset: one attempt, short timeout
    pub fn aggressive() -> Self {
        Self {
            max_attempts: 1,
            call_timeout_secs: 120,
            structured_output: true,
            include_legend: false,
            max_echo_chars: 0,
        }
    }

    /// Lenient preset: more repair rounds and a long timeout
    pub fn lenient() -> Self {
        Self {
            max_attempts: 5,
            call_timeout_secs: 600,
            structured_output: true,
            include_legend: true,
            max_echo_chars: 8_000,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
