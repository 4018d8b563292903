//! English rendering of the same structures

use parley_domain::{
    ArgumentLink, Attitude, Claim, Confidence, Evidence, RelationType, Symbolic,
};

fn words(machine_value: &str) -> String {
    machine_value.replace('_', " ")
}

fn confidence_phrase(confidence: Confidence) -> String {
    format!("{} confidence", words(confidence.as_str()))
}

fn attitude_phrase(attitude: Attitude) -> &'static str {
    match attitude {
        Attitude::Approve => "approves",
        Attitude::Disapprove => "disapproves",
        Attitude::Mixed => "mixed",
        Attitude::Neutral => "neutral",
    }
}

fn relation_phrase(relation: RelationType) -> &'static str {
    match relation {
        RelationType::Supports => "supports",
        RelationType::Attacks => "attacks",
        RelationType::Explains => "explains",
        RelationType::Equivalent => "is equivalent to",
    }
}

/// Sentence describing the evidence, if there is any
pub fn prose_evidence(evidence: &Evidence) -> Option<String> {
    match evidence {
        Evidence::Structured(citations) if citations.is_empty() => None,
        Evidence::Structured(citations) => {
            let parts: Vec<String> = citations
                .iter()
                .map(|c| {
                    let mut part = format!(
                        "{} ({})",
                        words(c.source.as_str()),
                        words(c.strength.as_str())
                    );
                    if let Some(description) = c.description.as_deref() {
                        part.push_str(&format!(": {}", description.trim()));
                    }
                    part
                })
                .collect();
            Some(format!("Evidence: {}.", parts.join("; ")))
        }
        Evidence::Freeform(summary) if summary.trim().is_empty() => None,
        Evidence::Freeform(summary) => Some(format!("Evidence: {}.", summary.trim())),
    }
}

/// One claim as a sentence
///
/// `Claim ①: "text" (high confidence; approves; fact), held by Tenant. Evidence: ...`
pub fn prose_claim(claim: &Claim, index: usize) -> String {
    let mut sentence = format!(
        "Claim {}: \"{}\" ({}; {}; {})",
        claim.marker(index),
        claim.claim_text,
        confidence_phrase(claim.confidence),
        attitude_phrase(claim.attitude),
        claim.claim_type.as_str()
    );
    if let Some(role) = claim.role.as_deref().filter(|r| !r.trim().is_empty()) {
        sentence.push_str(&format!(", held by {}", role.trim()));
    }
    sentence.push('.');
    if let Some(evidence) = prose_evidence(&claim.evidence) {
        sentence.push(' ');
        sentence.push_str(&evidence);
    }
    sentence
}

/// One relation as a sentence
pub fn prose_relation(link: &ArgumentLink) -> String {
    let mut sentence = format!(
        "Claim {} {} claim {}",
        link.from_claim.trim(),
        relation_phrase(link.relation),
        link.to_claim.trim()
    );
    if let Some(explanation) = link.explanation.as_deref().filter(|e| !e.trim().is_empty()) {
        sentence.push_str(&format!(" ({})", explanation.trim()));
    }
    sentence.push('.');
    sentence
}
