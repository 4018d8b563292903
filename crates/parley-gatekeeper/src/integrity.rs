//! Identifier uniqueness and reference resolution

use std::collections::HashSet;

use parley_domain::{ArgumentLink, NegotiationAnalysis};

use crate::reader::{child, element};
use crate::violation::Violation;

fn dangling(
    links: &[ArgumentLink],
    path: &str,
    resolves: impl Fn(&str) -> bool,
    out: &mut Vec<Violation>,
) {
    for (k, link) in links.iter().enumerate() {
        for (field, reference) in [("from_claim", &link.from_claim), ("to_claim", &link.to_claim)] {
            if !resolves(reference.as_str()) {
                out.push(Violation::DanglingReference {
                    path: element(path, "links", k),
                    field: field.to_string(),
                    reference: reference.clone(),
                });
            }
        }
    }
}

/// Every integrity violation in the analysis
pub(crate) fn check(analysis: &NegotiationAnalysis, path: &str) -> Vec<Violation> {
    let mut out = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut seen_ranks = HashSet::new();

    for (i, variation) in analysis.variations.iter().enumerate() {
        let variation_path = element(path, "variations", i);

        let id = variation.variation_id.trim();
        if !seen_ids.insert(id) {
            out.push(Violation::DuplicateIdentifier {
                path: variation_path.clone(),
                field: "variation_id".to_string(),
                id: id.to_string(),
            });
        }

        if !seen_ranks.insert(variation.rank) {
            out.push(Violation::DuplicateRank {
                path: variation_path.clone(),
                rank: variation.rank,
            });
        }

        let mut claim_ids = HashSet::new();
        for (j, claim) in variation.key_claims.iter().enumerate() {
            if let Some(claim_id) = claim.claim_id.as_deref().map(str::trim) {
                if !claim_ids.insert(claim_id) {
                    out.push(Violation::DuplicateIdentifier {
                        path: element(&variation_path, "key_claims", j),
                        field: "claim_id".to_string(),
                        id: claim_id.to_string(),
                    });
                }
            }
        }

        dangling(
            &variation.links,
            &variation_path,
            |reference| variation.resolve_local(reference).is_some(),
            &mut out,
        );
    }

    let index = analysis.claim_index();
    dangling(
        &analysis.comparative_reasoning.links,
        &child(path, "comparative_reasoning"),
        |reference| index.contains(reference),
        &mut out,
    );

    out
}
