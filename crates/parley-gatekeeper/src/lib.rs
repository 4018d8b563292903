//! Parley Gatekeeper
//!
//! Validates untrusted candidates (LLM output, dataset lines) against the
//! typed reasoning model.
//!
//! The Gatekeeper provides:
//! - Presence and structure checks with exact field paths
//! - Enumeration membership and range checks
//! - Non-fatal cardinality and score/rank warnings
//! - Identifier uniqueness and dangling-reference detection
//! - Strict or loose handling of claim evidence
//!
//! # Examples
//!
//! ```
//! use parley_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::loose());
//! let err = gatekeeper.validate_analysis_str("{}").unwrap_err();
//!
//! for hint in err.repair_hints() {
//!     println!("{}", hint);
//! }
//! ```

#![warn(missing_docs)]

mod advisory;
mod assemble;
mod config;
mod integrity;
mod reader;
mod validator;
mod violation;

pub use config::{EvidenceMode, ValidationConfig};
pub use validator::Gatekeeper;
pub use violation::{Accepted, ConformanceError, ConformanceWarning, Violation, ViolationClass};
