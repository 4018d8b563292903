//! Negotiation analysis - the observer's context, the variations and the
//! comparison across them
//!
//! Claims never own each other. Links name their endpoints by identifier and
//! are resolved through a [`ClaimIndex`] built from the analysis.

use std::collections::HashMap;

use serde::Serialize;

use crate::claim::Claim;
use crate::relationship::ArgumentLink;
use crate::variation::Variation;

/// The single viewpoint an analysis is written from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegotiationContext {
    /// Who the observer is (e.g. "Tenant")
    pub observer_role: String,

    /// What the observer cares about
    pub observer_interests: String,
}

/// Cross-variation comparison
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComparativeReasoning {
    /// Key tradeoffs between variations
    pub key_tradeoffs: Vec<String>,

    /// Strategic recommendations for the observer
    pub strategic_recommendations: Vec<String>,

    /// Overall assessment comparing all variations
    pub overall_assessment: String,

    /// Links between claims of different variations, by composite id
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<ArgumentLink>,
}

/// Complete analysis of one clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegotiationAnalysis {
    /// Clause text the analysis is about
    pub original_clause: String,

    /// Observer perspective
    pub context: NegotiationContext,

    /// Variations in the order they were generated
    pub variations: Vec<Variation>,

    /// Comparison across the variations
    pub comparative_reasoning: ComparativeReasoning,
}

impl NegotiationAnalysis {
    /// Variation with the given id
    pub fn variation(&self, variation_id: &str) -> Option<&Variation> {
        self.variations
            .iter()
            .find(|v| v.variation_id.trim() == variation_id.trim())
    }

    /// Variations ordered best first
    pub fn ranked(&self) -> Vec<&Variation> {
        let mut ranked: Vec<&Variation> = self.variations.iter().collect();
        ranked.sort_by_key(|v| v.rank);
        ranked
    }

    /// Build the identifier table for this analysis
    pub fn claim_index(&self) -> ClaimIndex {
        ClaimIndex::build(&self.variations)
    }

    /// Variation id followed by the claim marker (`A 2` → `A②`)
    ///
    /// Variation references come back as the bare id.
    pub fn canonical_reference(&self, reference: &str) -> Option<String> {
        match self.claim_index().resolve(reference)? {
            ClaimLocation::Variation(v) => Some(self.variations.get(v)?.variation_id.trim().to_string()),
            ClaimLocation::Claim { variation, claim } => {
                let variation = self.variations.get(variation)?;
                let marker = variation.key_claims.get(claim)?.marker(claim + 1);
                Some(format!("{}{}", variation.variation_id.trim(), marker.trim()))
            }
        }
    }

    /// Claim at a composite reference
    pub fn claim(&self, reference: &str) -> Option<&Claim> {
        match self.claim_index().resolve(reference)? {
            ClaimLocation::Claim { variation, claim } => {
                self.variations.get(variation)?.key_claims.get(claim)
            }
            ClaimLocation::Variation(_) => None,
        }
    }
}

/// Where an identifier points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimLocation {
    /// A whole variation, by index
    Variation(usize),
    /// One claim, by variation index and claim index
    Claim {
        /// Index into `variations`
        variation: usize,
        /// Index into that variation's `key_claims`
        claim: usize,
    },
}

/// Lookup table from every identifier in an analysis to its location
///
/// Keys are bare variation ids (`A`) and composite claim ids made of the
/// variation id followed by any local id of the claim (`A②`, `A2`, `AC1`).
/// When two entries would share a key the first one is kept; duplicates are
/// reported by validation, not here.
#[derive(Debug, Clone, Default)]
pub struct ClaimIndex {
    entries: HashMap<String, ClaimLocation>,
}

impl ClaimIndex {
    /// Index the given variations
    pub fn build(variations: &[Variation]) -> Self {
        let mut entries = HashMap::new();

        for (v_idx, variation) in variations.iter().enumerate() {
            entries
                .entry(variation.variation_id.trim().to_string())
                .or_insert(ClaimLocation::Variation(v_idx));
        }

        for (v_idx, variation) in variations.iter().enumerate() {
            let prefix = variation.variation_id.trim();
            for (c_idx, claim) in variation.key_claims.iter().enumerate() {
                for local in claim.local_keys(c_idx + 1) {
                    entries
                        .entry(format!("{}{}", prefix, local))
                        .or_insert(ClaimLocation::Claim {
                            variation: v_idx,
                            claim: c_idx,
                        });
                }
            }
        }

        Self { entries }
    }

    /// Look up a composite reference
    pub fn resolve(&self, reference: &str) -> Option<ClaimLocation> {
        let reference = reference.trim();
        self.entries.get(reference).copied().or_else(|| {
            // tolerate "A ②" and "A.2"
            let compact: String = reference
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '.')
                .collect();
            self.entries.get(&compact).copied()
        })
    }

    /// Whether a reference resolves
    pub fn contains(&self, reference: &str) -> bool {
        self.resolve(reference).is_some()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
