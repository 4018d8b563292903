//! Parley Domain Layer
//!
//! Core vocabulary for negotiation-analysis records: the symbol registry, the
//! typed reasoning model, and the trait boundary to LLM providers.
//!
//! ## Key Concepts
//!
//! - **Symbol Registry**: fixed machine value ⇄ glyph tables per enumeration family
//! - **Claim**: a proposition with confidence, attitude, claim type and evidence
//! - **Variation**: one negotiation position with ranked, scored reasoning
//! - **Negotiation Analysis**: the observer's view across all variations
//! - **Record**: a source clause paired with its analysis, append-only
//!
//! ## Architecture
//!
//! - Pure data and lookups, no I/O
//! - Claims reference each other by identifier, never by ownership
//! - Model types serialize to the persisted JSON layout; untrusted JSON is
//!   turned into them by the gatekeeper, not by deserialization

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod claim;
pub mod evidence;
pub mod record;
pub mod relationship;
pub mod risk;
pub mod stance;
pub mod symbols;
pub mod traits;
pub mod variation;

// Re-exports for convenience
pub use analysis::{ClaimIndex, ClaimLocation, ComparativeReasoning, NegotiationAnalysis, NegotiationContext};
pub use claim::Claim;
pub use evidence::{Evidence, EvidenceCitation, EvidenceSource, EvidenceStrength};
pub use record::{Record, SourceClause};
pub use relationship::{ArgumentLink, RelationType};
pub use risk::RiskLevel;
pub use stance::{Attitude, ClaimType, Confidence};
pub use symbols::{RegistryError, SymbolFamily, Symbolic};
pub use variation::Variation;
