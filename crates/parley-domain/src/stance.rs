//! Epistemic and normative markers attached to every claim

use serde::{Deserialize, Serialize};

use crate::symbols::{SymbolFamily, Symbolic};

/// Confidence in a claim's truth, strictly ordered from `VeryLow` to `Certain`
///
/// Five members with five distinct glyphs. Older notation documents used
/// `very_low` for both "leaning false" and "certain false"; that distinction
/// is not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// ○ Very doubtful
    VeryLow,
    /// ◌ Unsure
    Low,
    /// ◐ Leaning toward
    Moderate,
    /// ● Strongly believe
    High,
    /// ⬤ Absolutely sure
    Certain,
}

impl Symbolic for Confidence {
    const FAMILY: SymbolFamily = SymbolFamily::Confidence;
    const ALL: &'static [Self] = &[
        Confidence::VeryLow,
        Confidence::Low,
        Confidence::Moderate,
        Confidence::High,
        Confidence::Certain,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Confidence::VeryLow => "very_low",
            Confidence::Low => "low",
            Confidence::Moderate => "moderate",
            Confidence::High => "high",
            Confidence::Certain => "certain",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Confidence::VeryLow => "○",
            Confidence::Low => "◌",
            Confidence::Moderate => "◐",
            Confidence::High => "●",
            Confidence::Certain => "⬤",
        }
    }
}

/// How the observer feels about the state of affairs a claim describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attitude {
    /// ⬆ Good for the observer
    Approve,
    /// ⬇ Bad for the observer
    Disapprove,
    /// ⇆ Depends on context
    Mixed,
    /// ⟂ No value judgment
    Neutral,
}

impl Symbolic for Attitude {
    const FAMILY: SymbolFamily = SymbolFamily::Attitude;
    const ALL: &'static [Self] = &[
        Attitude::Approve,
        Attitude::Disapprove,
        Attitude::Mixed,
        Attitude::Neutral,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Attitude::Approve => "approve",
            Attitude::Disapprove => "disapprove",
            Attitude::Mixed => "mixed",
            Attitude::Neutral => "neutral",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Attitude::Approve => "⬆",
            Attitude::Disapprove => "⬇",
            Attitude::Mixed => "⇆",
            Attitude::Neutral => "⟂",
        }
    }
}

/// Kind of claim being made
///
/// Orthogonal to [`Confidence`] and [`Attitude`]: a policy claim still
/// carries a truth confidence (will it work?) and an attitude (should we
/// adopt it?).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    /// ⧈ Descriptive, empirical
    Fact,
    /// ⚖ Ethical or normative judgment
    Value,
    /// ⏵ Recommendation or strategy
    Policy,
    /// ✦ Taste
    Preference,
}

impl Symbolic for ClaimType {
    const FAMILY: SymbolFamily = SymbolFamily::ClaimType;
    const ALL: &'static [Self] = &[
        ClaimType::Fact,
        ClaimType::Value,
        ClaimType::Policy,
        ClaimType::Preference,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Fact => "fact",
            ClaimType::Value => "value",
            ClaimType::Policy => "policy",
            ClaimType::Preference => "preference",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ClaimType::Fact => "⧈",
            ClaimType::Value => "⚖",
            ClaimType::Policy => "⏵",
            ClaimType::Preference => "✦",
        }
    }
}
