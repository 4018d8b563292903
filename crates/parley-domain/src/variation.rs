//! Variation module - one negotiation position on a clause

use serde::Serialize;

use crate::claim::{parse_ordinal, Claim};
use crate::relationship::{ArgumentLink, RelationType};
use crate::risk::RiskLevel;

/// Lower bound of the value score scale
pub const MIN_VALUE_SCORE: f64 = 0.0;
/// Upper bound of the value score scale
pub const MAX_VALUE_SCORE: f64 = 100.0;

/// A rewritten version of the original clause, with its reasoning
///
/// Rank 1 is the best variation for the observer. Ranks are unique within an
/// analysis; scores are expected (but not required) to fall as rank grows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variation {
    /// Identifier, usually a letter (`A`, `B`, ...)
    pub variation_id: String,

    /// The modified clause text
    pub variation_text: String,

    /// 1 = most preferred
    pub rank: u32,

    /// Desirability on a 0-100 scale
    pub value_score: f64,

    /// Reasoning claims, addressed locally by ordinal or explicit id
    pub key_claims: Vec<Claim>,

    /// Relation links between this variation's claims, by local id
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<ArgumentLink>,

    /// Main advantages from the observer's perspective
    pub key_advantages: Vec<String>,

    /// Main disadvantages from the observer's perspective
    pub key_disadvantages: Vec<String>,

    /// Risk the clause would not be enforced as written
    pub enforceability_risk: RiskLevel,

    /// Commercial exposure for the observer
    pub business_risk: RiskLevel,

    /// Prose synthesis of the reasoning
    pub explanation: String,
}

impl Variation {
    /// Find the 0-based index of the claim a local reference points at
    ///
    /// Explicit ids win over ordinals, so a claim with `claim_id: "2"` is
    /// found before the claim in second position.
    pub fn resolve_local(&self, reference: &str) -> Option<usize> {
        let reference = reference.trim();
        if let Some(index) = self
            .key_claims
            .iter()
            .position(|c| c.claim_id.as_deref().map(str::trim) == Some(reference))
        {
            return Some(index);
        }

        parse_ordinal(reference)
            .map(|position| position - 1)
            .filter(|index| *index < self.key_claims.len())
    }

    /// Marker of the claim a local reference points at (`2` → `②`)
    pub fn canonical_local(&self, reference: &str) -> Option<String> {
        let index = self.resolve_local(reference)?;
        Some(self.key_claims[index].marker(index + 1).trim().to_string())
    }

    /// Claim at a local reference
    pub fn claim(&self, reference: &str) -> Option<&Claim> {
        self.resolve_local(reference).map(|i| &self.key_claims[i])
    }

    /// Claims whose local links point at `reference` with `relation`
    ///
    /// Claims come back in claim order, each once. Empty when the reference
    /// does not resolve.
    pub fn links_into(&self, reference: &str, relation: RelationType) -> Vec<&Claim> {
        let Some(target) = self.resolve_local(reference) else {
            return Vec::new();
        };
        let mut sources: Vec<usize> = self
            .links
            .iter()
            .filter(|link| link.relation == relation)
            .filter(|link| self.resolve_local(&link.to_claim) == Some(target))
            .filter_map(|link| self.resolve_local(&link.from_claim))
            .collect();
        sources.sort_unstable();
        sources.dedup();
        sources.into_iter().map(|i| &self.key_claims[i]).collect()
    }

    /// Claims that support the claim at `reference`
    pub fn supporting_claims(&self, reference: &str) -> Vec<&Claim> {
        self.links_into(reference, RelationType::Supports)
    }

    /// Claims that attack the claim at `reference`
    pub fn attacking_claims(&self, reference: &str) -> Vec<&Claim> {
        self.links_into(reference, RelationType::Attacks)
    }

    /// Whether the score lies on the 0-100 scale
    pub fn score_in_range(&self) -> bool {
        (MIN_VALUE_SCORE..=MAX_VALUE_SCORE).contains(&self.value_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stance::{Attitude, ClaimType, Confidence};

    fn variation(claims: Vec<Claim>) -> Variation {
        Variation {
            variation_id: "A".to_string(),
            variation_text: "Tenant may terminate on 30 days notice.".to_string(),
            rank: 1,
            value_score: 82.5,
            key_claims: claims,
            links: vec![ArgumentLink::new("①", RelationType::Supports, "②")],
            key_advantages: vec!["Flexibility".to_string()],
            key_disadvantages: vec![],
            enforceability_risk: RiskLevel::Low,
            business_risk: RiskLevel::Moderate,
            explanation: "Short notice favors the tenant.".to_string(),
        }
    }

    fn claim(text: &str) -> Claim {
        Claim::new(text, Confidence::High, Attitude::Approve, ClaimType::Fact)
    }

    #[test]
    fn test_resolve_by_ordinal() {
        let v = variation(vec![claim("a"), claim("b"), claim("c")]);
        assert_eq!(v.resolve_local("①"), Some(0));
        assert_eq!(v.resolve_local("3"), Some(2));
        assert_eq!(v.resolve_local("④"), None);
        assert_eq!(v.resolve_local("0"), None);
    }

    #[test]
    fn test_explicit_id_wins() {
        let v = variation(vec![claim("a"), claim("b"), claim("c").with_id("2")]);
        assert_eq!(v.resolve_local("2"), Some(2));
        assert_eq!(v.claim("②").map(|c| c.claim_text.as_str()), Some("b"));
    }

    #[test]
    fn test_links_into() {
        let mut v = variation(vec![claim("a"), claim("b"), claim("c"), claim("d")]);
        v.links = vec![
            ArgumentLink::new("①", RelationType::Supports, "②"),
            ArgumentLink::new("3", RelationType::Supports, "2"),
            ArgumentLink::new("④", RelationType::Attacks, "②"),
            ArgumentLink::new("1", RelationType::Supports, "②"),
            ArgumentLink::new("⑨", RelationType::Supports, "②"),
        ];

        let texts = |claims: Vec<&Claim>| claims.iter().map(|c| c.claim_text.clone()).collect::<Vec<_>>();
        assert_eq!(texts(v.supporting_claims("②")), vec!["a", "c"]);
        assert_eq!(texts(v.attacking_claims("2")), vec!["d"]);
        assert!(v.links_into("②", RelationType::Equivalent).is_empty());
        assert!(v.supporting_claims("①").is_empty());
        assert!(v.supporting_claims("⑦").is_empty());
    }

    #[test]
    fn test_canonical_local() {
        let v = variation(vec![claim("a"), claim("b").with_id("cap")]);
        assert_eq!(v.canonical_local("1").as_deref(), Some("①"));
        assert_eq!(v.canonical_local("②").as_deref(), Some("cap"));
        assert_eq!(v.canonical_local("③"), None);
    }

    #[test]
    fn test_score_range() {
        let mut v = variation(vec![]);
        assert!(v.score_in_range());
        v.value_score = 100.5;
        assert!(!v.score_in_range());
    }

    #[test]
    fn test_links_omitted_when_empty() {
        let mut v = variation(vec![claim("a")]);
        v.links.clear();
        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("links").is_none());
        assert_eq!(json["enforceability_risk"], "low");
    }
}
