//! Candidate validation

use parley_domain::{NegotiationAnalysis, Record};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::advisory;
use crate::assemble::Assembler;
use crate::config::ValidationConfig;
use crate::integrity;
use crate::reader::Reader;
use crate::violation::{Accepted, ConformanceError, ConformanceWarning};

/// The Gatekeeper turns untrusted JSON into typed values
///
/// Checks run class by class: presence and structure, then enumeration
/// membership and ranges, then the non-fatal cardinality and score checks,
/// then identifier integrity. The first class with any violation ends
/// validation and every violation of that class is reported.
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default (strict) configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a bare negotiation analysis, as produced by the generator
    pub fn validate_analysis(
        &self,
        candidate: &Value,
    ) -> Result<Accepted<NegotiationAnalysis>, ConformanceError> {
        let mut reader = Reader::new();
        let analysis = reader
            .as_object(candidate, "", "$")
            .and_then(|obj| Assembler::new(&mut reader, self.config.evidence_mode).analysis(obj, ""));

        let analysis = self.first_pass(reader, analysis)?;
        let warnings = advisory::warnings(&analysis, &self.config, "");
        self.integrity(&analysis, "")?;

        self.accept(analysis, warnings)
    }

    /// Validate a persisted dataset record
    pub fn validate_record(&self, candidate: &Value) -> Result<Accepted<Record>, ConformanceError> {
        const ANALYSIS: &str = "negotiation_analysis";

        let mut reader = Reader::new();
        let parts = reader
            .as_object(candidate, "", "$")
            .and_then(|obj| Assembler::new(&mut reader, self.config.evidence_mode).record(obj));

        let parts = self.first_pass(reader, parts)?;
        let mut warnings = advisory::warnings(&parts.analysis, &self.config, ANALYSIS);
        self.integrity(&parts.analysis, ANALYSIS)?;

        let record = Record::at(parts.clause, parts.analysis, parts.timestamp);
        if let Some(stored) = parts.stored_hash {
            let matches = Uuid::parse_str(&stored)
                .map(|uuid| uuid == record.clause_hash)
                .unwrap_or(false);
            if !matches {
                warnings.push(ConformanceWarning::ContentKeyMismatch {
                    stored,
                    computed: record.clause_hash.to_string(),
                });
            }
        }

        let echoed = record.negotiation_analysis.original_clause.trim();
        if echoed != record.original_clause_data.clause.trim() {
            warnings.push(ConformanceWarning::OriginalClauseMismatch {
                echoed: echoed.to_string(),
            });
        }

        self.accept(record, warnings)
    }

    /// Parse one JSON line and validate it as a record
    pub fn validate_str(&self, line: &str) -> Result<Accepted<Record>, ConformanceError> {
        let value: Value = serde_json::from_str(line).map_err(|e| {
            debug!("Rejected malformed JSON: {}", e);
            ConformanceError::malformed(e.to_string())
        })?;
        self.validate_record(&value)
    }

    /// Parse JSON text and validate it as a bare analysis
    pub fn validate_analysis_str(
        &self,
        text: &str,
    ) -> Result<Accepted<NegotiationAnalysis>, ConformanceError> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            debug!("Rejected malformed JSON: {}", e);
            ConformanceError::malformed(e.to_string())
        })?;
        self.validate_analysis(&value)
    }

    /// Presence, structure and membership, collected in one walk
    fn first_pass<T>(&self, reader: Reader, value: Option<T>) -> Result<T, ConformanceError> {
        if let Some(err) = ConformanceError::from_violations(reader.violations) {
            debug!(
                "Rejected candidate: {} check, {} violation(s)",
                err.class,
                err.violations.len()
            );
            return Err(err);
        }
        // every accessor that yields None records a violation first
        value.ok_or_else(|| ConformanceError::malformed("candidate could not be assembled"))
    }

    fn integrity(&self, analysis: &NegotiationAnalysis, path: &str) -> Result<(), ConformanceError> {
        match ConformanceError::from_violations(integrity::check(analysis, path)) {
            Some(err) => {
                debug!("Rejected candidate: {} integrity violation(s)", err.violations.len());
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn accept<T>(
        &self,
        value: T,
        warnings: Vec<ConformanceWarning>,
    ) -> Result<Accepted<T>, ConformanceError> {
        for warning in &warnings {
            warn!("Accepted with warning: {}", warning);
        }
        Ok(Accepted { value, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::{Violation, ViolationClass};
    use serde_json::json;

    fn claim(confidence: &str) -> Value {
        json!({
            "claim_text": "Twelve months is typical",
            "confidence": confidence,
            "attitude": "neutral",
            "claim_type": "fact",
            "evidence": [{"source": "industry_practice", "strength": "strong"}]
        })
    }

    fn variation(id: &str, rank: u32, score: f64) -> Value {
        json!({
            "variation_id": id,
            "variation_text": "Restriction of twelve months.",
            "rank": rank,
            "value_score": score,
            "key_claims": [claim("high"), claim("moderate")],
            "key_advantages": ["Shorter"],
            "key_disadvantages": [],
            "enforceability_risk": "low",
            "business_risk": "moderate",
            "explanation": "Balanced."
        })
    }

    fn analysis() -> Value {
        json!({
            "original_clause": "Employee shall not solicit clients for 24 months.",
            "context": {"observer_role": "Employee", "observer_interests": "Mobility"},
            "variations": [variation("A", 1, 80.0), variation("B", 2, 40.0)],
            "comparative_reasoning": {
                "key_tradeoffs": ["Time vs money"],
                "strategic_recommendations": ["Ask for A"],
                "overall_assessment": "A wins."
            }
        })
    }

    #[test]
    fn test_accepts_clean_analysis() {
        let accepted = Gatekeeper::default_config()
            .validate_analysis(&analysis())
            .unwrap();
        assert!(accepted.is_clean());
        assert_eq!(accepted.value.variations.len(), 2);
    }

    #[test]
    fn test_root_must_be_object() {
        let err = Gatekeeper::default_config()
            .validate_analysis(&json!([1, 2]))
            .unwrap_err();
        assert_eq!(err.class, ViolationClass::Presence);
        assert_eq!(err.repair_hints(), vec!["$: expected object, found array"]);
    }

    #[test]
    fn test_presence_hides_membership() {
        let mut candidate = analysis();
        candidate["variations"][0]["key_claims"][0]["confidence"] = json!("lean_true");
        candidate["context"]["observer_role"] = json!(null);

        let err = Gatekeeper::default_config()
            .validate_analysis(&candidate)
            .unwrap_err();
        assert_eq!(err.class, ViolationClass::Presence);
        assert_eq!(
            err.violations,
            vec![Violation::MissingField {
                path: "context".to_string(),
                field: "observer_role".to_string(),
            }]
        );
    }

    #[test]
    fn test_membership_and_range() {
        let mut candidate = analysis();
        candidate["variations"][0]["key_claims"][0]["confidence"] = json!("lean_true");
        candidate["variations"][1]["value_score"] = json!(140);
        candidate["variations"][1]["rank"] = json!(0);

        let err = Gatekeeper::default_config()
            .validate_analysis(&candidate)
            .unwrap_err();
        assert_eq!(err.class, ViolationClass::Membership);
        assert_eq!(err.count("InvalidEnumValue"), 1);
        assert_eq!(err.count("OutOfRange"), 2);
    }

    #[test]
    fn test_malformed_json() {
        let err = Gatekeeper::default_config().validate_str("{not json").unwrap_err();
        assert_eq!(err.class, ViolationClass::Syntax);
        assert_eq!(err.count("Malformed"), 1);
    }

    #[test]
    fn test_score_rank_inversion_is_a_warning() {
        let mut candidate = analysis();
        candidate["variations"][0]["value_score"] = json!(30.0);
        let accepted = Gatekeeper::default_config()
            .validate_analysis(&candidate)
            .unwrap();
        assert_eq!(accepted.warnings.len(), 1);
        assert_eq!(accepted.warnings[0].kind(), "ScoreRankInversion");
    }
}
