//! Gatekeeper configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How claim evidence is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceMode {
    /// Evidence must be an array of typed citations; free text is rejected
    #[default]
    Strict,
    /// Typed citations are kept when they parse, anything else becomes a
    /// freeform summary
    Loose,
}

impl EvidenceMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceMode::Strict => "strict",
            EvidenceMode::Loose => "loose",
        }
    }
}

impl fmt::Display for EvidenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvidenceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(EvidenceMode::Strict),
            "loose" => Ok(EvidenceMode::Loose),
            _ => Err(format!("Invalid evidence mode: {} (expected strict or loose)", s)),
        }
    }
}

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Evidence handling
    pub evidence_mode: EvidenceMode,

    /// Fewest key claims per variation before a cardinality warning
    pub min_key_claims: usize,

    /// Most key claims per variation before a cardinality warning
    pub max_key_claims: usize,

    /// Fewest variations per analysis before a cardinality warning
    pub min_variations: usize,

    /// Most variations per analysis before a cardinality warning
    pub max_variations: usize,

    /// Warn when a better-ranked variation scores lower than a worse one
    pub warn_score_rank_inversion: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl ValidationConfig {
    /// Structured evidence required
    pub fn strict() -> Self {
        Self {
            evidence_mode: EvidenceMode::Strict,
            min_key_claims: 2,
            max_key_claims: 5,
            min_variations: 2,
            max_variations: 4,
            warn_score_rank_inversion: true,
        }
    }

    /// Freeform evidence summaries accepted
    pub fn loose() -> Self {
        Self {
            evidence_mode: EvidenceMode::Loose,
            ..Self::strict()
        }
    }

    /// Same bounds with the given evidence mode
    pub fn with_mode(mut self, evidence_mode: EvidenceMode) -> Self {
        self.evidence_mode = evidence_mode;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_key_claims > self.max_key_claims {
            return Err("min_key_claims cannot exceed max_key_claims".to_string());
        }
        if self.min_variations > self.max_variations {
            return Err("min_variations cannot exceed max_variations".to_string());
        }
        if self.max_variations == 0 {
            return Err("max_variations must be greater than 0".to_string());
        }
        Ok(())
    }
}
