//! Whole-record rendering in either output format

use std::fmt;
use std::str::FromStr;

use parley_domain::{NegotiationAnalysis, Record, SourceClause, Variation};

use crate::compact::{canonical_links, quote, render_comparative, render_variation};
use crate::prose::{prose_claim, prose_relation};

const RULE: &str = "────────────────────────────────────────";

/// Output format for a rendered record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// Glyph notation
    #[default]
    Compact,
    /// English sentences
    Prose,
}

impl RenderFormat {
    /// Get the format name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Compact => "compact",
            RenderFormat::Prose => "prose",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(RenderFormat::Compact),
            "prose" => Ok(RenderFormat::Prose),
            _ => Err(format!("Invalid render format: {}", s)),
        }
    }
}

fn indent(block: &str, prefix: &str) -> Vec<String> {
    block
        .lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect()
}

fn clause_lines(clause: &SourceClause, format: RenderFormat) -> Vec<String> {
    match format {
        RenderFormat::Compact => vec![
            format!(
                "§ {} | {} | {} | {} | {}",
                clause.clause_type, clause.area_of_law, clause.location, clause.industry, clause.date
            ),
            format!("  {}", quote(&clause.clause)),
        ],
        RenderFormat::Prose => vec![
            format!(
                "Clause ({}, {}, {}, {}, {}):",
                clause.clause_type, clause.area_of_law, clause.location, clause.industry, clause.date
            ),
            format!("  {}", clause.clause),
        ],
    }
}

fn compact_variation(variation: &Variation) -> Vec<String> {
    let mut lines = vec![
        format!(
            "[{}] #{} {:.1} | enforceability:{} business:{}",
            variation.variation_id.trim(),
            variation.rank,
            variation.value_score,
            variation.enforceability_risk.as_str(),
            variation.business_risk.as_str()
        ),
        format!("  {}", quote(&variation.variation_text)),
    ];
    lines.extend(indent(&render_variation(variation), "  "));
    lines.extend(variation.key_advantages.iter().map(|a| format!("  + {}", a)));
    lines.extend(variation.key_disadvantages.iter().map(|d| format!("  - {}", d)));
    if !variation.explanation.trim().is_empty() {
        lines.push(format!("  ∴ {}", variation.explanation.trim()));
    }
    lines
}

fn prose_variation(variation: &Variation) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Variation {} (rank {}, score {:.1})",
            variation.variation_id.trim(),
            variation.rank,
            variation.value_score
        ),
        format!("  Text: {}", variation.variation_text),
    ];
    lines.extend(
        variation
            .key_claims
            .iter()
            .enumerate()
            .map(|(i, claim)| format!("  {}", prose_claim(claim, i + 1))),
    );
    let links = canonical_links(&variation.links, |r| variation.canonical_local(r));
    lines.extend(links.iter().map(|l| format!("  {}", prose_relation(l))));
    if !variation.explanation.trim().is_empty() {
        lines.push(format!("  Explanation: {}", variation.explanation.trim()));
    }
    if !variation.key_advantages.is_empty() {
        lines.push("  Advantages:".to_string());
        lines.extend(variation.key_advantages.iter().map(|a| format!("    + {}", a)));
    }
    if !variation.key_disadvantages.is_empty() {
        lines.push("  Disadvantages:".to_string());
        lines.extend(variation.key_disadvantages.iter().map(|d| format!("    - {}", d)));
    }
    lines.push(format!(
        "  Enforceability risk: {}. Business risk: {}.",
        variation.enforceability_risk.as_str(),
        variation.business_risk.as_str()
    ));
    lines
}

fn prose_comparative(analysis: &NegotiationAnalysis) -> Vec<String> {
    let comparative = &analysis.comparative_reasoning;
    let mut lines = vec!["Comparative assessment".to_string()];

    let ranking: Vec<String> = analysis
        .ranked()
        .iter()
        .map(|v| v.variation_id.trim().to_string())
        .collect();
    if !ranking.is_empty() {
        lines.push(format!("  Preference order: {}", ranking.join(", ")));
    }
    let links = canonical_links(&comparative.links, |r| analysis.canonical_reference(r));
    lines.extend(links.iter().map(|l| format!("  {}", prose_relation(l))));
    if !comparative.key_tradeoffs.is_empty() {
        lines.push("  Tradeoffs:".to_string());
        lines.extend(comparative.key_tradeoffs.iter().map(|t| format!("    - {}", t)));
    }
    if !comparative.strategic_recommendations.is_empty() {
        lines.push("  Recommendations:".to_string());
        lines.extend(
            comparative
                .strategic_recommendations
                .iter()
                .enumerate()
                .map(|(i, r)| format!("    {}. {}", i + 1, r)),
        );
    }
    if !comparative.overall_assessment.trim().is_empty() {
        lines.push(format!("  Overall: {}", comparative.overall_assessment.trim()));
    }
    lines
}

/// Render an analysis without its source clause
pub fn render_analysis(analysis: &NegotiationAnalysis, format: RenderFormat) -> String {
    let context = &analysis.context;
    let mut lines = match format {
        RenderFormat::Compact => vec![format!(
            "OBSERVER «{}»: {}",
            context.observer_role.trim(),
            context.observer_interests.trim()
        )],
        RenderFormat::Prose => vec![
            format!("Observer: {}.", context.observer_role.trim()),
            format!("Interests: {}", context.observer_interests.trim()),
        ],
    };

    for variation in &analysis.variations {
        lines.push(String::new());
        match format {
            RenderFormat::Compact => lines.extend(compact_variation(variation)),
            RenderFormat::Prose => lines.extend(prose_variation(variation)),
        }
    }

    lines.push(String::new());
    match format {
        RenderFormat::Compact => {
            lines.push("COMPARATIVE".to_string());
            lines.extend(indent(&render_comparative(analysis), "  "));
        }
        RenderFormat::Prose => lines.extend(prose_comparative(analysis)),
    }

    lines.join("\n")
}

/// Render a full record: source clause, then the analysis
///
/// Deterministic; the record timestamp is not part of the output.
pub fn render_record(record: &Record, format: RenderFormat) -> String {
    let mut lines = clause_lines(&record.original_clause_data, format);
    lines.push(RULE.to_string());
    lines.push(render_analysis(&record.negotiation_analysis, format));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("Prose".parse::<RenderFormat>(), Ok(RenderFormat::Prose));
        assert_eq!(" compact".parse::<RenderFormat>(), Ok(RenderFormat::Compact));
        assert!("json".parse::<RenderFormat>().is_err());
        assert_eq!(RenderFormat::default(), RenderFormat::Compact);
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\nb", "  "), vec!["  a", "  b"]);
    }
}
