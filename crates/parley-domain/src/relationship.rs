//! Relations between claims (pairwise, by identifier)

use serde::{Deserialize, Serialize};

use crate::symbols::{SymbolFamily, Symbolic};

/// How one claim bears on another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// ⟶ Supports, pro-argument
    Supports,
    /// ⟞ Undercuts or challenges
    Attacks,
    /// ⇢ Explains or causes
    Explains,
    /// ⟺ Equivalent, mutual support
    Equivalent,
}

impl Symbolic for RelationType {
    const FAMILY: SymbolFamily = SymbolFamily::RelationType;
    const ALL: &'static [Self] = &[
        RelationType::Supports,
        RelationType::Attacks,
        RelationType::Explains,
        RelationType::Equivalent,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            RelationType::Supports => "supports",
            RelationType::Attacks => "attacks",
            RelationType::Explains => "explains",
            RelationType::Equivalent => "equivalent",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            RelationType::Supports => "⟶",
            RelationType::Attacks => "⟞",
            RelationType::Explains => "⇢",
            RelationType::Equivalent => "⟺",
        }
    }
}

/// A directed link between two claims
///
/// Endpoints are plain identifiers, never owning references. Inside a
/// variation they are local ids (`①`, `2`, or an explicit `claim_id`); in the
/// comparative section they are composite ids such as `A②` or a bare
/// variation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentLink {
    /// Source claim identifier
    pub from_claim: String,

    /// Target claim identifier
    pub to_claim: String,

    /// How `from_claim` relates to `to_claim`
    pub relation: RelationType,

    /// Short justification of the link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ArgumentLink {
    /// Create a new link
    pub fn new(
        from_claim: impl Into<String>,
        relation: RelationType,
        to_claim: impl Into<String>,
    ) -> Self {
        Self {
            from_claim: from_claim.into(),
            to_claim: to_claim.into(),
            relation,
            explanation: None,
        }
    }

    /// Attach an explanation
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Both endpoints, source first
    pub fn endpoints(&self) -> [&str; 2] {
        [&self.from_claim, &self.to_claim]
    }
}
