//! JSON schema of a negotiation analysis, for providers with structured output

use parley_domain::{
    Attitude, ClaimType, Confidence, EvidenceSource, EvidenceStrength, RelationType, RiskLevel,
    Symbolic,
};
use serde_json::{json, Value};

fn one_of<T: Symbolic>() -> Value {
    json!({"type": "string", "enum": T::allowed_values()})
}

fn strings() -> Value {
    json!({"type": "array", "items": {"type": "string"}})
}

fn links() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "from_claim": {"type": "string"},
                "relation": one_of::<RelationType>(),
                "to_claim": {"type": "string"},
                "explanation": {"type": "string"}
            },
            "required": ["from_claim", "relation", "to_claim"]
        }
    })
}

/// Schema for the flat layout with structured evidence
///
/// Enumerations come from the symbol registry. Cardinality and the
/// rank/score relation are left to validation.
pub fn analysis_schema() -> Value {
    let risk = json!({"type": "string", "enum": RiskLevel::allowed_values()});

    let claim = json!({
        "type": "object",
        "properties": {
            "claim_text": {"type": "string"},
            "confidence": one_of::<Confidence>(),
            "attitude": one_of::<Attitude>(),
            "claim_type": one_of::<ClaimType>(),
            "evidence": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "source": one_of::<EvidenceSource>(),
                        "strength": one_of::<EvidenceStrength>(),
                        "description": {"type": "string"}
                    },
                    "required": ["source", "strength"]
                }
            }
        },
        "required": ["claim_text", "confidence", "attitude", "claim_type", "evidence"]
    });

    let variation = json!({
        "type": "object",
        "properties": {
            "variation_id": {"type": "string"},
            "variation_text": {"type": "string"},
            "rank": {"type": "integer", "minimum": 1},
            "value_score": {"type": "number", "minimum": 0, "maximum": 100},
            "key_claims": {"type": "array", "items": claim},
            "links": links(),
            "key_advantages": strings(),
            "key_disadvantages": strings(),
            "enforceability_risk": risk.clone(),
            "business_risk": risk,
            "explanation": {"type": "string"}
        },
        "required": [
            "variation_id", "variation_text", "rank", "value_score", "key_claims",
            "key_advantages", "key_disadvantages", "enforceability_risk",
            "business_risk", "explanation"
        ]
    });

    json!({
        "type": "object",
        "properties": {
            "original_clause": {"type": "string"},
            "context": {
                "type": "object",
                "properties": {
                    "observer_role": {"type": "string"},
                    "observer_interests": {"type": "string"}
                },
                "required": ["observer_role", "observer_interests"]
            },
            "variations": {"type": "array", "items": variation},
            "comparative_reasoning": {
                "type": "object",
                "properties": {
                    "key_tradeoffs": strings(),
                    "strategic_recommendations": strings(),
                    "overall_assessment": {"type": "string"},
                    "links": links()
                },
                "required": ["key_tradeoffs", "strategic_recommendations", "overall_assessment"]
            }
        },
        "required": ["original_clause", "context", "variations", "comparative_reasoning"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_follow_registry() {
        let schema = analysis_schema();
        let claim = &schema["properties"]["variations"]["items"]["properties"]["key_claims"]["items"];
        assert_eq!(
            claim["properties"]["confidence"]["enum"],
            json!(["very_low", "low", "moderate", "high", "certain"])
        );
        assert_eq!(
            claim["properties"]["evidence"]["items"]["properties"]["source"]["enum"]
                .as_array()
                .unwrap()
                .len(),
            9
        );
    }

    #[test]
    fn test_risk_is_closed() {
        let schema = analysis_schema();
        let variation = &schema["properties"]["variations"]["items"]["properties"];
        assert_eq!(variation["business_risk"]["enum"], json!(["low", "moderate", "high"]));
    }
}
