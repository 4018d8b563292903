//! Parley Notation
//!
//! Pure, deterministic rendering of validated analyses into the compact glyph
//! notation or into English prose, plus a line-level reader for the compact
//! form.
//!
//! # Examples
//!
//! ```
//! use parley_domain::{ArgumentLink, RelationType};
//! use parley_notation::render_relations;
//!
//! let links = vec![ArgumentLink::new("①", RelationType::Supports, "③")];
//! assert_eq!(render_relations(&links), "① ⟶ ③");
//! ```

#![warn(missing_docs)]

mod compact;
mod error;
mod format;
mod legend;
mod parse;
mod prose;

pub use compact::{
    render_claim, render_comparative, render_evidence, render_relation, render_relations,
    render_variation, CONJUNCTION, TURNSTILE,
};
pub use error::NotationError;
pub use format::{render_analysis, render_record, RenderFormat};
pub use legend::legend;
pub use parse::{parse_claim_line, parse_relation_line, ParsedClaimLine};
pub use prose::{prose_claim, prose_evidence, prose_relation};
