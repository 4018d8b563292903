//! Dataset records: a source clause paired with its analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::analysis::NegotiationAnalysis;

/// Namespace for clause content keys
pub const CLAUSE_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_93b7_5d08_a1e4_7c5b_0d3f_9e21);

/// One input clause with its metadata
///
/// The six named fields are required. Any other keys are carried through to
/// the output record untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceClause {
    /// Clause text
    pub clause: String,
    /// Date associated with the clause
    pub date: String,
    /// Area of law (e.g. "Employment Law")
    pub area_of_law: String,
    /// Jurisdiction
    pub location: String,
    /// Industry
    pub industry: String,
    /// Clause type (e.g. "Non-Solicitation")
    pub clause_type: String,
    /// Pass-through metadata
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SourceClause {
    /// Deterministic content key over the six named fields
    ///
    /// Extra metadata does not contribute, so re-exports of the same clause
    /// with added keys still map to the same record.
    pub fn content_key(&self) -> Uuid {
        let input = [
            self.clause.as_str(),
            self.date.as_str(),
            self.area_of_law.as_str(),
            self.location.as_str(),
            self.industry.as_str(),
            self.clause_type.as_str(),
        ]
        .join("|");
        Uuid::new_v5(&CLAUSE_NAMESPACE, input.as_bytes())
    }
}

/// A generated dataset entry
///
/// Created once per input clause and never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Content key of the source clause
    pub clause_hash: Uuid,

    /// The source clause, verbatim
    pub original_clause_data: SourceClause,

    /// Validated analysis
    pub negotiation_analysis: NegotiationAnalysis,

    /// Generation time (UTC)
    pub timestamp: DateTime<Utc>,
}

impl Record {
    /// Assemble a record stamped with the current time
    pub fn new(original_clause_data: SourceClause, negotiation_analysis: NegotiationAnalysis) -> Self {
        Self::at(original_clause_data, negotiation_analysis, Utc::now())
    }

    /// Assemble a record with an explicit timestamp
    pub fn at(
        original_clause_data: SourceClause,
        negotiation_analysis: NegotiationAnalysis,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            clause_hash: original_clause_data.content_key(),
            original_clause_data,
            negotiation_analysis,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause() -> SourceClause {
        serde_json::from_value(serde_json::json!({
            "clause": "Tenant shall pay rent monthly.",
            "date": "2024-03-01",
            "area_of_law": "Real Estate",
            "location": "Texas",
            "industry": "Retail",
            "clause_type": "Lease Payment",
            "source_doc": "lease-17"
        }))
        .unwrap()
    }

    #[test]
    fn test_extra_keys_pass_through() {
        let c = clause();
        assert_eq!(c.extra["source_doc"], "lease-17");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["source_doc"], "lease-17");
        assert_eq!(json["clause_type"], "Lease Payment");
    }

    #[test]
    fn test_content_key_is_stable() {
        let a = clause();
        let mut b = clause();
        b.extra.insert("batch".to_string(), Value::from(3));
        assert_eq!(a.content_key(), b.content_key());

        b.location = "Ohio".to_string();
        assert_ne!(a.content_key(), b.content_key());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result: Result<SourceClause, _> = serde_json::from_value(serde_json::json!({
            "clause": "x", "date": "y"
        }));
        assert!(result.is_err());
    }
}
