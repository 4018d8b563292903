//! Evidence citations and the two shapes evidence may take

use serde::{Deserialize, Serialize};

use crate::symbols::{SymbolFamily, Symbolic};

/// Source or type of a piece of evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    /// ⚖️ Case law
    LegalPrecedent,
    /// 📜 Statutory authority
    Statute,
    /// 📊 Data or statistics
    Data,
    /// 🏢 Standard industry practice
    IndustryPractice,
    /// 💰 Economic or cost analysis
    Economic,
    /// ⚠ Risk analysis
    Risk,
    /// 📚 Theory or literature
    Theory,
    /// 👁 Direct observation
    Observation,
    /// 🗣 Expert or authority testimony
    Testimony,
}

impl Symbolic for EvidenceSource {
    const FAMILY: SymbolFamily = SymbolFamily::EvidenceSource;
    const ALL: &'static [Self] = &[
        EvidenceSource::LegalPrecedent,
        EvidenceSource::Statute,
        EvidenceSource::Data,
        EvidenceSource::IndustryPractice,
        EvidenceSource::Economic,
        EvidenceSource::Risk,
        EvidenceSource::Theory,
        EvidenceSource::Observation,
        EvidenceSource::Testimony,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            EvidenceSource::LegalPrecedent => "legal_precedent",
            EvidenceSource::Statute => "statute",
            EvidenceSource::Data => "data",
            EvidenceSource::IndustryPractice => "industry_practice",
            EvidenceSource::Economic => "economic",
            EvidenceSource::Risk => "risk",
            EvidenceSource::Theory => "theory",
            EvidenceSource::Observation => "observation",
            EvidenceSource::Testimony => "testimony",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            EvidenceSource::LegalPrecedent => "⚖\u{fe0f}",
            EvidenceSource::Statute => "📜",
            EvidenceSource::Data => "📊",
            EvidenceSource::IndustryPractice => "🏢",
            EvidenceSource::Economic => "💰",
            EvidenceSource::Risk => "⚠",
            EvidenceSource::Theory => "📚",
            EvidenceSource::Observation => "👁",
            EvidenceSource::Testimony => "🗣",
        }
    }
}

/// Strength of a piece of evidence, ordered from `VeryWeak` to `VeryStrong`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    /// ☆
    VeryWeak,
    /// ★
    Weak,
    /// ★★
    Strong,
    /// ★★★
    VeryStrong,
}

impl EvidenceStrength {
    /// Number of star glyphs in the rendered form
    pub fn stars(&self) -> usize {
        match self {
            EvidenceStrength::VeryWeak | EvidenceStrength::Weak => 1,
            EvidenceStrength::Strong => 2,
            EvidenceStrength::VeryStrong => 3,
        }
    }
}

impl Symbolic for EvidenceStrength {
    const FAMILY: SymbolFamily = SymbolFamily::EvidenceStrength;
    const ALL: &'static [Self] = &[
        EvidenceStrength::VeryWeak,
        EvidenceStrength::Weak,
        EvidenceStrength::Strong,
        EvidenceStrength::VeryStrong,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            EvidenceStrength::VeryWeak => "very_weak",
            EvidenceStrength::Weak => "weak",
            EvidenceStrength::Strong => "strong",
            EvidenceStrength::VeryStrong => "very_strong",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            EvidenceStrength::VeryWeak => "☆",
            EvidenceStrength::Weak => "★",
            EvidenceStrength::Strong => "★★",
            EvidenceStrength::VeryStrong => "★★★",
        }
    }
}

/// One cited piece of evidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceCitation {
    /// Type or source of the evidence
    pub source: EvidenceSource,

    /// How strong the evidence is
    pub strength: EvidenceStrength,

    /// What the evidence shows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EvidenceCitation {
    /// Create a citation without a description
    pub fn new(source: EvidenceSource, strength: EvidenceStrength) -> Self {
        Self {
            source,
            strength,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Evidence backing a claim
///
/// Structured citations are AND-combined and kept in the order they were
/// given. The freeform variant holds an unstructured summary such as
/// `"case law + industry practice"`, which only loose validation accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Evidence {
    /// Typed citations, persisted under `evidence`
    #[serde(rename = "evidence")]
    Structured(Vec<EvidenceCitation>),

    /// Unstructured summary, persisted under `evidence_summary`
    #[serde(rename = "evidence_summary")]
    Freeform(String),
}

impl Evidence {
    /// No evidence at all
    pub fn none() -> Self {
        Evidence::Structured(Vec::new())
    }

    /// Whether there is nothing to show
    pub fn is_empty(&self) -> bool {
        match self {
            Evidence::Structured(citations) => citations.is_empty(),
            Evidence::Freeform(summary) => summary.trim().is_empty(),
        }
    }

    /// The structured citations, if this is the structured variant
    pub fn citations(&self) -> Option<&[EvidenceCitation]> {
        match self {
            Evidence::Structured(citations) => Some(citations),
            Evidence::Freeform(_) => None,
        }
    }
}

impl Default for Evidence {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_follow_ordinal_rank() {
        assert_eq!(EvidenceStrength::Weak.stars(), 1);
        assert_eq!(EvidenceStrength::Strong.stars(), 2);
        assert_eq!(EvidenceStrength::VeryStrong.stars(), 3);
        for strength in EvidenceStrength::ALL {
            assert_eq!(strength.symbol().chars().count(), strength.stars());
        }
    }

    #[test]
    fn test_strength_ordering() {
        assert!(EvidenceStrength::VeryWeak < EvidenceStrength::Weak);
        assert!(EvidenceStrength::Strong < EvidenceStrength::VeryStrong);
    }

    #[test]
    fn test_source_machine_values() {
        assert_eq!(
            serde_json::to_value(EvidenceSource::IndustryPractice).unwrap(),
            "industry_practice"
        );
        assert_eq!(EvidenceSource::parse("economic"), Some(EvidenceSource::Economic));
        assert_eq!(EvidenceSource::parse("case_law"), None);
    }

    #[test]
    fn test_evidence_emptiness() {
        assert!(Evidence::none().is_empty());
        assert!(Evidence::Freeform("  ".to_string()).is_empty());
        assert!(!Evidence::Structured(vec![EvidenceCitation::new(
            EvidenceSource::Data,
            EvidenceStrength::Weak
        )])
        .is_empty());
    }
}
