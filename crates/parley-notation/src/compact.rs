//! Compact symbolic notation
//!
//! A claim line reads
//!
//! ```text
//! ① «Tenant» ●⬆ ⧈ "Rent is fixed for the term" ⊢ 📜★★ ⋀ 🏢★
//! ```
//!
//! marker, optional role, confidence and attitude glyphs, claim-type glyph,
//! quoted text, then the turnstile followed by the AND-joined citations.
//! Relation lines read `① ⟶ ②`, optionally followed by `  // explanation`.

use parley_domain::{ArgumentLink, Claim, Evidence, NegotiationAnalysis, Symbolic, Variation};

/// Turnstile separating a claim from its evidence
pub const TURNSTILE: &str = "⊢";
/// Conjunction between evidence citations
pub const CONJUNCTION: &str = "⋀";
/// Prefix marking freeform evidence after the turnstile
pub const FREEFORM_MARK: char = '~';
/// Separator before a relation's explanation
pub const COMMENT: &str = "//";

/// Quote text, escaping backslashes, quotes and newlines
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Render the evidence segment without the turnstile
///
/// Returns `None` when there is nothing to show.
pub fn render_evidence(evidence: &Evidence) -> Option<String> {
    match evidence {
        Evidence::Structured(citations) if citations.is_empty() => None,
        Evidence::Structured(citations) => Some(
            citations
                .iter()
                .map(|c| format!("{}{}", c.source.symbol(), c.strength.symbol()))
                .collect::<Vec<_>>()
                .join(&format!(" {} ", CONJUNCTION)),
        ),
        Evidence::Freeform(summary) => Some(format!("{}{}", FREEFORM_MARK, quote(summary))),
    }
}

/// Render one claim at 1-based `index`
///
/// # Examples
///
/// ```
/// use parley_domain::{Attitude, Claim, ClaimType, Confidence, Evidence};
/// use parley_domain::{EvidenceCitation, EvidenceSource, EvidenceStrength};
/// use parley_notation::render_claim;
///
/// let claim = Claim::new("12 months is typical", Confidence::High, Attitude::Approve, ClaimType::Fact)
///     .with_evidence(Evidence::Structured(vec![EvidenceCitation::new(
///         EvidenceSource::IndustryPractice,
///         EvidenceStrength::Strong,
///     )]));
///
/// assert_eq!(render_claim(&claim, 1), "① ●⬆ ⧈ \"12 months is typical\" ⊢ 🏢★★");
/// ```
pub fn render_claim(claim: &Claim, index: usize) -> String {
    let mut line = claim.marker(index);

    if let Some(role) = claim.role.as_deref().filter(|r| !r.trim().is_empty()) {
        line.push_str(&format!(" «{}»", role.trim()));
    }

    line.push_str(&format!(
        " {}{} {} {}",
        claim.confidence.symbol(),
        claim.attitude.symbol(),
        claim.claim_type.symbol(),
        quote(&claim.claim_text)
    ));

    if let Some(evidence) = render_evidence(&claim.evidence) {
        line.push_str(&format!(" {} {}", TURNSTILE, evidence));
    }

    line
}

/// Render one relation line
pub fn render_relation(link: &ArgumentLink) -> String {
    let mut line = format!(
        "{} {} {}",
        link.from_claim.trim(),
        link.relation.symbol(),
        link.to_claim.trim()
    );
    if let Some(explanation) = link.explanation.as_deref().filter(|e| !e.trim().is_empty()) {
        line.push_str(&format!("  {} {}", COMMENT, explanation.trim()));
    }
    line
}

/// Render relation lines in input order, one per line
pub fn render_relations(links: &[ArgumentLink]) -> String {
    links.iter().map(render_relation).collect::<Vec<_>>().join("\n")
}

/// Links with endpoints rewritten by `canonical`; unresolved ones stay as stored
pub(crate) fn canonical_links<F>(links: &[ArgumentLink], canonical: F) -> Vec<ArgumentLink>
where
    F: Fn(&str) -> Option<String>,
{
    links
        .iter()
        .map(|link| ArgumentLink {
            from_claim: canonical(&link.from_claim).unwrap_or_else(|| link.from_claim.clone()),
            to_claim: canonical(&link.to_claim).unwrap_or_else(|| link.to_claim.clone()),
            ..link.clone()
        })
        .collect()
}

/// Claim lines followed by the variation's local relation lines
pub fn render_variation(variation: &Variation) -> String {
    let mut lines: Vec<String> = variation
        .key_claims
        .iter()
        .enumerate()
        .map(|(i, claim)| render_claim(claim, i + 1))
        .collect();

    if !variation.links.is_empty() {
        let links = canonical_links(&variation.links, |r| variation.canonical_local(r));
        lines.push(render_relations(&links));
    }

    lines.join("\n")
}

/// Ranking, cross-variation links, then the comparison itself
///
/// Link endpoints are written as the variation id followed by the claim
/// marker, whatever spelling the record stores.
pub fn render_comparative(analysis: &NegotiationAnalysis) -> String {
    let comparative = &analysis.comparative_reasoning;
    let mut lines = Vec::new();

    let ranking = analysis
        .ranked()
        .iter()
        .map(|v| format!("{} ({:.1})", v.variation_id.trim(), v.value_score))
        .collect::<Vec<_>>();
    if !ranking.is_empty() {
        lines.push(ranking.join(" ≻ "));
    }

    if !comparative.links.is_empty() {
        let links = canonical_links(&comparative.links, |r| analysis.canonical_reference(r));
        lines.push(render_relations(&links));
    }
    for tradeoff in &comparative.key_tradeoffs {
        lines.push(format!("⇄ {}", tradeoff));
    }
    for recommendation in &comparative.strategic_recommendations {
        lines.push(format!("⏵ {}", recommendation));
    }
    if !comparative.overall_assessment.trim().is_empty() {
        lines.push(format!("∴ {}", comparative.overall_assessment.trim()));
    }

    lines.join("\n")
}
