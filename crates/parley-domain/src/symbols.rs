//! Symbol registry - the fixed mapping between machine values and display glyphs
//!
//! Every enumerated field of the reasoning schema has two spellings:
//! - the machine value that is persisted (`"high"`, `"industry_practice"`)
//! - the glyph used by the compact notation (`●`, `🏢`)
//!
//! The tables are static and immutable. Each family is total and injective,
//! so `value_for(family, symbol_for(family, v)?)` always yields `v`.

use std::fmt;

use thiserror::Error;

use crate::evidence::{EvidenceSource, EvidenceStrength};
use crate::relationship::RelationType;
use crate::stance::{Attitude, ClaimType, Confidence};

/// The six independent enumeration families known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolFamily {
    /// Epistemic confidence in a claim's truth
    Confidence,
    /// Normative stance toward a state of affairs
    Attitude,
    /// Kind of claim (fact, value, policy, preference)
    ClaimType,
    /// Where a piece of evidence comes from
    EvidenceSource,
    /// How strong a piece of evidence is
    EvidenceStrength,
    /// How one claim bears on another
    RelationType,
}

impl SymbolFamily {
    /// All families in canonical order
    pub const ALL: &'static [SymbolFamily] = &[
        SymbolFamily::Confidence,
        SymbolFamily::Attitude,
        SymbolFamily::ClaimType,
        SymbolFamily::EvidenceSource,
        SymbolFamily::EvidenceStrength,
        SymbolFamily::RelationType,
    ];

    /// Field-style name of the family
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolFamily::Confidence => "confidence",
            SymbolFamily::Attitude => "attitude",
            SymbolFamily::ClaimType => "claim_type",
            SymbolFamily::EvidenceSource => "evidence_source",
            SymbolFamily::EvidenceStrength => "evidence_strength",
            SymbolFamily::RelationType => "relation_type",
        }
    }
}

impl fmt::Display for SymbolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry lookup failures
///
/// A renderer working on validated data never produces these; they surface
/// only from string-keyed lookups (notation parsing, tooling).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The machine value is not part of the family
    #[error("unknown {family} value '{value}'")]
    UnknownValue {
        /// Family that was searched
        family: SymbolFamily,
        /// Offending value
        value: String,
    },

    /// The glyph is not part of the family
    #[error("unknown {family} glyph '{glyph}'")]
    UnknownGlyph {
        /// Family that was searched
        family: SymbolFamily,
        /// Offending glyph
        glyph: String,
    },
}

/// A closed enumeration with a machine value and a display glyph per member
pub trait Symbolic: Sized + Copy + PartialEq + 'static {
    /// Registry family this enumeration belongs to
    const FAMILY: SymbolFamily;

    /// Every member, in canonical (ordinal where meaningful) order
    const ALL: &'static [Self];

    /// Persisted machine value
    fn as_str(&self) -> &'static str;

    /// Display glyph
    fn symbol(&self) -> &'static str;

    /// Parse a machine value, ignoring case and surrounding whitespace
    fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase();
        Self::ALL.iter().copied().find(|v| v.as_str() == normalized)
    }

    /// Look up a member by its glyph
    fn from_symbol(glyph: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.symbol() == glyph)
    }

    /// The closed set of machine values, for diagnostics
    fn allowed_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }
}

fn pairs<T: Symbolic>() -> Vec<(&'static str, &'static str)> {
    T::ALL.iter().map(|v| (v.as_str(), v.symbol())).collect()
}

/// `(machine value, glyph)` pairs of a family in canonical order
pub fn entries(family: SymbolFamily) -> Vec<(&'static str, &'static str)> {
    match family {
        SymbolFamily::Confidence => pairs::<Confidence>(),
        SymbolFamily::Attitude => pairs::<Attitude>(),
        SymbolFamily::ClaimType => pairs::<ClaimType>(),
        SymbolFamily::EvidenceSource => pairs::<EvidenceSource>(),
        SymbolFamily::EvidenceStrength => pairs::<EvidenceStrength>(),
        SymbolFamily::RelationType => pairs::<RelationType>(),
    }
}

/// Glyph for a machine value
///
/// # Examples
///
/// ```
/// use parley_domain::symbols::{symbol_for, SymbolFamily};
///
/// assert_eq!(symbol_for(SymbolFamily::EvidenceSource, "industry_practice").unwrap(), "🏢");
/// assert!(symbol_for(SymbolFamily::Attitude, "ambivalent").is_err());
/// ```
pub fn symbol_for(family: SymbolFamily, value: &str) -> Result<&'static str, RegistryError> {
    entries(family)
        .into_iter()
        .find(|(v, _)| *v == value)
        .map(|(_, glyph)| glyph)
        .ok_or_else(|| RegistryError::UnknownValue {
            family,
            value: value.to_string(),
        })
}

/// Machine value for a glyph
pub fn value_for(family: SymbolFamily, glyph: &str) -> Result<&'static str, RegistryError> {
    entries(family)
        .into_iter()
        .find(|(_, g)| *g == glyph)
        .map(|(value, _)| value)
        .ok_or_else(|| RegistryError::UnknownGlyph {
            family,
            glyph: glyph.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_family_is_injective() {
        for family in SymbolFamily::ALL {
            let entries = entries(*family);
            let values: HashSet<_> = entries.iter().map(|(v, _)| *v).collect();
            let glyphs: HashSet<_> = entries.iter().map(|(_, g)| *g).collect();
            assert_eq!(values.len(), entries.len(), "duplicate value in {}", family);
            assert_eq!(glyphs.len(), entries.len(), "duplicate glyph in {}", family);
        }
    }

    #[test]
    fn test_round_trip_all_values() {
        for family in SymbolFamily::ALL {
            for (value, _) in entries(*family) {
                let glyph = symbol_for(*family, value).unwrap();
                assert_eq!(value_for(*family, glyph).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_unknown_value() {
        let err = symbol_for(SymbolFamily::Confidence, "lean_false").unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownValue {
                family: SymbolFamily::Confidence,
                value: "lean_false".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_glyph() {
        // ◑ was documented for "leaning false" but has no member
        let err = value_for(SymbolFamily::Confidence, "◑").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownGlyph { .. }));
        assert!(err.to_string().contains("confidence"));
    }

    #[test]
    fn test_glyphs_are_scoped_per_family() {
        // ⚖ is the "value" claim type; the legal precedent source uses ⚖️
        assert_eq!(value_for(SymbolFamily::ClaimType, "⚖").unwrap(), "value");
        assert!(value_for(SymbolFamily::EvidenceSource, "⚖").is_err());
        assert_eq!(
            value_for(SymbolFamily::EvidenceSource, "⚖\u{fe0f}").unwrap(),
            "legal_precedent"
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Confidence::parse(" High "), Some(Confidence::High));
        assert_eq!(Confidence::parse("lean_true"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn family_strategy() -> impl Strategy<Value = SymbolFamily> {
        prop::sample::select(SymbolFamily::ALL.to_vec())
    }

    proptest! {
        /// Property: value -> glyph -> value is the identity for every member
        #[test]
        fn test_registry_round_trip(family in family_strategy(), pick in any::<prop::sample::Index>()) {
            let entries = entries(family);
            let (value, _) = entries[pick.index(entries.len())];
            let glyph = symbol_for(family, value).unwrap();
            prop_assert_eq!(value_for(family, glyph).unwrap(), value);
        }

        /// Property: lookups never silently default on arbitrary input
        #[test]
        fn test_unknown_strings_fail(family in family_strategy(), junk in "[a-z]{1,12}_x") {
            prop_assert!(symbol_for(family, &junk).is_err());
        }
    }
}
