//! Notation key derived from the symbol registry

use parley_domain::symbols::{entries, SymbolFamily};

use crate::compact::{CONJUNCTION, FREEFORM_MARK, TURNSTILE};

fn title(family: SymbolFamily) -> &'static str {
    match family {
        SymbolFamily::Confidence => "Confidence",
        SymbolFamily::Attitude => "Attitude",
        SymbolFamily::ClaimType => "Claim type",
        SymbolFamily::EvidenceSource => "Evidence source",
        SymbolFamily::EvidenceStrength => "Evidence strength",
        SymbolFamily::RelationType => "Relation",
    }
}

/// One legend line per registry family, then the structural markers
///
/// ```text
/// Confidence: ○ very_low · ◌ low · ◐ moderate · ● high · ⬤ certain
/// ```
pub fn legend() -> String {
    let mut lines: Vec<String> = SymbolFamily::ALL
        .iter()
        .map(|family| {
            let pairs = entries(*family)
                .into_iter()
                .map(|(value, glyph)| format!("{} {}", glyph, value))
                .collect::<Vec<_>>()
                .join(" · ");
            format!("{}: {}", title(*family), pairs)
        })
        .collect();

    lines.push(format!(
        "Structure: {} evidence follows · {} and · {}\"...\" freeform evidence summary",
        TURNSTILE, CONJUNCTION, FREEFORM_MARK
    ));
    lines.push("Claims: ① ② ③ by position, or an explicit id; A② is claim ② of variation A".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_lists_every_family() {
        let legend = legend();
        assert!(legend.contains("Confidence: ○ very_low · ◌ low · ◐ moderate · ● high · ⬤ certain"));
        assert!(legend.contains("🏢 industry_practice"));
        assert!(legend.contains("⟞ attacks"));
        assert_eq!(legend.lines().count(), SymbolFamily::ALL.len() + 2);
    }
}
