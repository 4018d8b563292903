//! Claim module - a single proposition in the reasoning about a variation

use serde::Serialize;

use crate::evidence::Evidence;
use crate::stance::{Attitude, ClaimType, Confidence};

/// Highest position that has a circled-numeral marker (①..⑳)
pub const MAX_CIRCLED_ORDINAL: usize = 20;

/// Marker for the claim at 1-based `position`
///
/// Positions 1 through 20 use circled numerals; anything beyond falls back
/// to a parenthesised number.
///
/// # Examples
///
/// ```
/// use parley_domain::claim::ordinal_marker;
///
/// assert_eq!(ordinal_marker(1), "①");
/// assert_eq!(ordinal_marker(4), "④");
/// assert_eq!(ordinal_marker(21), "(21)");
/// ```
pub fn ordinal_marker(position: usize) -> String {
    if (1..=MAX_CIRCLED_ORDINAL).contains(&position) {
        // U+2460 is ①
        char::from_u32(0x2460 + (position as u32 - 1))
            .map(String::from)
            .unwrap_or_else(|| format!("({})", position))
    } else {
        format!("({})", position)
    }
}

/// Parse an ordinal reference (`③`, `3` or `(3)`) into a 1-based position
pub fn parse_ordinal(reference: &str) -> Option<usize> {
    let reference = reference.trim();
    let mut chars = reference.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let code = c as u32;
        if (0x2460..0x2460 + MAX_CIRCLED_ORDINAL as u32).contains(&code) {
            return Some((code - 0x2460 + 1) as usize);
        }
    }

    let digits = reference
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .unwrap_or(reference);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok().filter(|n| *n >= 1)
}

/// A claim about a clause variation
///
/// Carries what is claimed, how confident the observer is that it is true,
/// whether the observer welcomes it, what kind of claim it is, and the
/// evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    /// Explicit identifier; when absent the claim is addressed by its ordinal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<String>,

    /// Who holds this view (e.g. "Tenant", "Court")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The proposition in natural language
    pub claim_text: String,

    /// Confidence in the claim's truth
    pub confidence: Confidence,

    /// Normative stance
    pub attitude: Attitude,

    /// Kind of claim
    pub claim_type: ClaimType,

    /// Supporting evidence
    #[serde(flatten)]
    pub evidence: Evidence,
}

impl Claim {
    /// Create a claim with no evidence, identifier or role
    pub fn new(
        claim_text: impl Into<String>,
        confidence: Confidence,
        attitude: Attitude,
        claim_type: ClaimType,
    ) -> Self {
        Self {
            claim_id: None,
            role: None,
            claim_text: claim_text.into(),
            confidence,
            attitude,
            claim_type,
            evidence: Evidence::none(),
        }
    }

    /// Set the evidence
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence = evidence;
        self
    }

    /// Set an explicit identifier
    pub fn with_id(mut self, claim_id: impl Into<String>) -> Self {
        self.claim_id = Some(claim_id.into());
        self
    }

    /// Set the role tag
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Identifier used in notation: the explicit id, or the circled ordinal
    pub fn marker(&self, position: usize) -> String {
        match &self.claim_id {
            Some(id) => id.clone(),
            None => ordinal_marker(position),
        }
    }

    /// Every local identifier this claim answers to at 1-based `position`
    pub fn local_keys(&self, position: usize) -> Vec<String> {
        let mut keys = Vec::with_capacity(3);
        if let Some(id) = &self.claim_id {
            keys.push(id.trim().to_string());
        }
        keys.push(ordinal_marker(position));
        keys.push(position.to_string());
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::{EvidenceCitation, EvidenceSource, EvidenceStrength};

    #[test]
    fn test_ordinal_markers() {
        assert_eq!(ordinal_marker(1), "①");
        assert_eq!(ordinal_marker(20), "⑳");
        assert_eq!(ordinal_marker(0), "(0)");
    }

    #[test]
    fn test_parse_ordinal() {
        assert_eq!(parse_ordinal("④"), Some(4));
        assert_eq!(parse_ordinal(" 2 "), Some(2));
        assert_eq!(parse_ordinal("(21)"), Some(21));
        assert_eq!(parse_ordinal("0"), None);
        assert_eq!(parse_ordinal("A2"), None);
        assert_eq!(parse_ordinal(""), None);
    }

    #[test]
    fn test_marker_prefers_explicit_id() {
        let claim = Claim::new("x", Confidence::Low, Attitude::Neutral, ClaimType::Fact);
        assert_eq!(claim.marker(3), "③");
        assert_eq!(claim.with_id("C1").marker(3), "C1");
    }

    #[test]
    fn test_serialized_layout() {
        let claim = Claim::new(
            "12 months is within the typical range",
            Confidence::High,
            Attitude::Neutral,
            ClaimType::Fact,
        )
        .with_evidence(Evidence::Structured(vec![EvidenceCitation::new(
            EvidenceSource::IndustryPractice,
            EvidenceStrength::Strong,
        )]));

        let json = serde_json::to_value(&claim).unwrap();
        assert_eq!(json["confidence"], "high");
        assert_eq!(json["evidence"][0]["source"], "industry_practice");
        assert_eq!(json["evidence"][0]["strength"], "strong");
        assert!(json.get("claim_id").is_none());
        assert!(json.get("evidence_summary").is_none());
    }

    #[test]
    fn test_freeform_layout() {
        let claim = Claim::new("x", Confidence::Low, Attitude::Mixed, ClaimType::Value)
            .with_evidence(Evidence::Freeform("case law + data".to_string()));
        let json = serde_json::to_value(&claim).unwrap();
        assert_eq!(json["evidence_summary"], "case law + data");
        assert!(json.get("evidence").is_none());
    }
}
