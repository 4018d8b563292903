//! Non-fatal checks on an assembled analysis

use parley_domain::NegotiationAnalysis;

use crate::config::ValidationConfig;
use crate::reader::element;
use crate::violation::ConformanceWarning;

fn cardinality(
    path: &str,
    field: &str,
    count: usize,
    min: usize,
    max: usize,
) -> Option<ConformanceWarning> {
    (count < min || count > max).then(|| ConformanceWarning::Cardinality {
        path: path.to_string(),
        field: field.to_string(),
        count,
        min,
        max,
    })
}

pub(crate) fn warnings(
    analysis: &NegotiationAnalysis,
    config: &ValidationConfig,
    path: &str,
) -> Vec<ConformanceWarning> {
    let mut warnings = Vec::new();

    warnings.extend(cardinality(
        path,
        "variations",
        analysis.variations.len(),
        config.min_variations,
        config.max_variations,
    ));

    for (i, variation) in analysis.variations.iter().enumerate() {
        warnings.extend(cardinality(
            &element(path, "variations", i),
            "key_claims",
            variation.key_claims.len(),
            config.min_key_claims,
            config.max_key_claims,
        ));
    }

    if config.warn_score_rank_inversion {
        let ranked = analysis.ranked();
        for (i, better) in ranked.iter().enumerate() {
            for worse in &ranked[i + 1..] {
                if better.rank < worse.rank && better.value_score < worse.value_score {
                    warnings.push(ConformanceWarning::ScoreRankInversion {
                        better: better.variation_id.clone(),
                        better_score: better.value_score,
                        worse: worse.variation_id.clone(),
                        worse_score: worse.value_score,
                    });
                }
            }
        }
    }

    warnings
}
