//! Violations, warnings and the rejection type

use std::fmt;

use thiserror::Error;

/// Check classes, in the order they run
///
/// Validation stops after the first class that reports anything, but every
/// violation within that class is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViolationClass {
    /// Input is not JSON at all
    Syntax,
    /// Required fields and JSON shapes
    Presence,
    /// Enumeration membership and numeric ranges
    Membership,
    /// Identifier uniqueness and reference resolution
    Integrity,
}

impl ViolationClass {
    /// Get the class name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationClass::Syntax => "syntax",
            ViolationClass::Presence => "presence",
            ViolationClass::Membership => "membership",
            ViolationClass::Integrity => "integrity",
        }
    }
}

impl fmt::Display for ViolationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn location(path: &str, field: &str) -> String {
    match (path.is_empty(), field.is_empty()) {
        (true, _) => field.to_string(),
        (false, true) => path.to_string(),
        (false, false) => format!("{}.{}", path, field),
    }
}

/// A single reason a candidate was rejected
///
/// `path` addresses the containing object (`variations[0].key_claims[2]`),
/// `field` the key inside it (`claim_type`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    /// Not parseable as JSON
    #[error("malformed JSON: {message}")]
    Malformed {
        /// Parser message
        message: String,
    },

    /// Required field absent, null or blank
    #[error("{}: missing required field", location(.path, .field))]
    MissingField {
        /// Containing object
        path: String,
        /// Missing key
        field: String,
    },

    /// Field present with the wrong shape
    #[error("{}: expected {expected}, found {found}", location(.path, .field))]
    StructuralMismatch {
        /// Containing object
        path: String,
        /// Offending key
        field: String,
        /// Shape that was required
        expected: String,
        /// Shape that was given
        found: String,
    },

    /// Value outside its closed enumeration
    #[error("{}: '{value}' is not one of {}", location(.path, .field), .allowed.join(", "))]
    InvalidEnumValue {
        /// Containing object
        path: String,
        /// Offending key
        field: String,
        /// Given value
        value: String,
        /// Allowed machine values
        allowed: Vec<&'static str>,
    },

    /// Number outside its permitted range
    #[error("{}: {value} is outside {bounds}", location(.path, .field))]
    OutOfRange {
        /// Containing object
        path: String,
        /// Offending key
        field: String,
        /// Given value
        value: String,
        /// Permitted range, human readable
        bounds: String,
    },

    /// Link endpoint that names no claim or variation
    #[error("{}: reference '{reference}' does not resolve", location(.path, .field))]
    DanglingReference {
        /// The link
        path: String,
        /// `from_claim` or `to_claim`
        field: String,
        /// Unresolved identifier
        reference: String,
    },

    /// Two variations share a rank
    #[error("{}: rank {rank} is already taken", location(.path, "rank"))]
    DuplicateRank {
        /// The later variation
        path: String,
        /// Shared rank
        rank: u32,
    },

    /// Two variations, or two claims of one variation, share an identifier
    #[error("{}: identifier '{id}' is already used", location(.path, .field))]
    DuplicateIdentifier {
        /// The later occurrence
        path: String,
        /// `variation_id` or `claim_id`
        field: String,
        /// Shared identifier
        id: String,
    },
}

impl Violation {
    /// Class this violation belongs to
    pub fn class(&self) -> ViolationClass {
        match self {
            Violation::Malformed { .. } => ViolationClass::Syntax,
            Violation::MissingField { .. } | Violation::StructuralMismatch { .. } => {
                ViolationClass::Presence
            }
            Violation::InvalidEnumValue { .. } | Violation::OutOfRange { .. } => {
                ViolationClass::Membership
            }
            Violation::DanglingReference { .. }
            | Violation::DuplicateRank { .. }
            | Violation::DuplicateIdentifier { .. } => ViolationClass::Integrity,
        }
    }

    /// Short kind name, for summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::Malformed { .. } => "Malformed",
            Violation::MissingField { .. } => "MissingField",
            Violation::StructuralMismatch { .. } => "StructuralMismatch",
            Violation::InvalidEnumValue { .. } => "InvalidEnumValue",
            Violation::OutOfRange { .. } => "OutOfRange",
            Violation::DanglingReference { .. } => "DanglingReference",
            Violation::DuplicateRank { .. } => "DuplicateRank",
            Violation::DuplicateIdentifier { .. } => "DuplicateIdentifier",
        }
    }
}

/// Non-fatal findings attached to an accepted value
#[derive(Debug, Clone, PartialEq)]
pub enum ConformanceWarning {
    /// A list is outside its recommended size
    Cardinality {
        /// Containing object
        path: String,
        /// `key_claims` or `variations`
        field: String,
        /// Actual size
        count: usize,
        /// Recommended minimum
        min: usize,
        /// Recommended maximum
        max: usize,
    },

    /// A better-ranked variation has a lower score than a worse-ranked one
    ScoreRankInversion {
        /// Variation with the better (lower) rank
        better: String,
        /// Its score
        better_score: f64,
        /// Variation with the worse rank
        worse: String,
        /// Its score
        worse_score: f64,
    },

    /// Stored `clause_hash` differs from the content key of the clause
    ContentKeyMismatch {
        /// Value found in the record
        stored: String,
        /// Key recomputed from the clause
        computed: String,
    },

    /// The analysis echoes a different clause text than the record's source
    OriginalClauseMismatch {
        /// `original_clause` as found in the analysis
        echoed: String,
    },
}

impl ConformanceWarning {
    /// Short kind name, for summaries
    pub fn kind(&self) -> &'static str {
        match self {
            ConformanceWarning::Cardinality { .. } => "Cardinality",
            ConformanceWarning::ScoreRankInversion { .. } => "ScoreRankInversion",
            ConformanceWarning::ContentKeyMismatch { .. } => "ContentKeyMismatch",
            ConformanceWarning::OriginalClauseMismatch { .. } => "OriginalClauseMismatch",
        }
    }
}

impl fmt::Display for ConformanceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConformanceWarning::Cardinality {
                path,
                field,
                count,
                min,
                max,
            } => write!(
                f,
                "{}: {} entries, expected {} to {}",
                location(path, field),
                count,
                min,
                max
            ),
            ConformanceWarning::ScoreRankInversion {
                better,
                better_score,
                worse,
                worse_score,
            } => write!(
                f,
                "variation {} ranks above {} but scores lower ({:.1} < {:.1})",
                better, worse, better_score, worse_score
            ),
            ConformanceWarning::ContentKeyMismatch { stored, computed } => write!(
                f,
                "clause_hash {} does not match clause content key {}",
                stored, computed
            ),
            ConformanceWarning::OriginalClauseMismatch { echoed } => write!(
                f,
                "negotiation_analysis.original_clause '{}' differs from original_clause_data.clause",
                excerpt(echoed)
            ),
        }
    }
}

/// A value that passed validation, with any non-fatal warnings
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted<T> {
    /// The typed value
    pub value: T,
    /// Non-fatal findings
    pub warnings: Vec<ConformanceWarning>,
}

impl<T> Accepted<T> {
    /// Whether there were no warnings
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Discard the warnings
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transform the value, keeping the warnings
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Accepted<U> {
        Accepted {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Rejection: every violation of the first failing class
///
/// Never constructed empty.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{class} check failed with {} violation(s): {}", .violations.len(), first_line(.violations))]
pub struct ConformanceError {
    /// Class that failed
    pub class: ViolationClass,
    /// Every violation of that class
    pub violations: Vec<Violation>,
}

fn excerpt(text: &str) -> String {
    const LIMIT: usize = 60;
    match text.char_indices().nth(LIMIT) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

fn first_line(violations: &[Violation]) -> String {
    violations
        .first()
        .map(|v| v.to_string())
        .unwrap_or_default()
}

impl ConformanceError {
    /// Group violations by class and keep the earliest failing class
    ///
    /// Returns `None` for an empty list.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        let class = violations.iter().map(Violation::class).min()?;
        let violations = violations.into_iter().filter(|v| v.class() == class).collect();
        Some(Self { class, violations })
    }

    /// Rejection for unparseable input
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            class: ViolationClass::Syntax,
            violations: vec![Violation::Malformed {
                message: message.into(),
            }],
        }
    }

    /// `location: problem` lines suitable for a targeted re-prompt
    pub fn repair_hints(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.to_string()).collect()
    }

    /// Number of violations of the given kind
    pub fn count(&self, kind: &str) -> usize {
        self.violations.iter().filter(|v| v.kind() == kind).count()
    }
}
