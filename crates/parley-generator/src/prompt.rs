//! LLM prompts for negotiation analysis

use parley_domain::SourceClause;
use parley_gatekeeper::ConformanceError;

/// Candidate observer roles for a clause type
///
/// The stronger or more protected party comes first.
pub fn observer_hints(clause_type: &str) -> [&'static str; 2] {
    let clause_type = clause_type.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| clause_type.contains(w));

    if mentions(&["landlord", "tenant", "lease"]) {
        ["Landlord", "Tenant"]
    } else if mentions(&["employment", "non-compete", "non-solicitation"]) {
        ["Employer", "Employee"]
    } else if mentions(&["vendor", "supplier"]) {
        ["Buyer", "Seller"]
    } else if mentions(&["confidentiality", "nda"]) {
        ["Disclosing Party", "Receiving Party"]
    } else if mentions(&["indemnification"]) {
        ["Indemnitor", "Indemnitee"]
    } else {
        ["Party A (Stronger)", "Party B (Weaker)"]
    }
}

/// Builds the analysis prompt for one source clause
pub struct PromptBuilder<'a> {
    clause: &'a SourceClause,
    include_legend: bool,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(clause: &'a SourceClause) -> Self {
        Self {
            clause,
            include_legend: true,
        }
    }

    /// Whether to print the notation legend
    pub fn with_legend(mut self, include_legend: bool) -> Self {
        self.include_legend = include_legend;
        self
    }

    /// Build the complete analysis prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if self.include_legend {
            prompt.push_str("## Notation\n\n");
            prompt.push_str("Claims are later rendered with these symbols. Output the machine values, never the symbols.\n\n");
            prompt.push_str(&parley_notation::legend());
            prompt.push_str("\n\n");
        }

        prompt.push_str(REASONING_GUIDANCE);
        prompt.push_str("\n\n");

        let clause = self.clause;
        prompt.push_str("## Clause\n\n---\n");
        prompt.push_str(clause.clause.trim());
        prompt.push_str("\n---\n\n");
        prompt.push_str("## Context\n\n");
        prompt.push_str(&format!("- Type: {}\n", clause.clause_type));
        prompt.push_str(&format!("- Area of Law: {}\n", clause.area_of_law));
        prompt.push_str(&format!("- Location: {}\n", clause.location));
        prompt.push_str(&format!("- Industry: {}\n", clause.industry));
        prompt.push_str(&format!("- Date: {}\n\n", clause.date));

        prompt.push_str(&format!(
            "Observer options: {}\n\n",
            observer_hints(&clause.clause_type).join(", ")
        ));

        prompt.push_str(OUTPUT_FORMAT);
        prompt
    }
}

/// Follow-up prompt after a rejected response
///
/// Repeats the original request, quotes the rejected response (cut to
/// `max_echo_chars`), and lists every violation by location.
pub fn repair_prompt(
    original: &str,
    rejected: &str,
    error: &ConformanceError,
    max_echo_chars: usize,
) -> String {
    let mut prompt = String::with_capacity(original.len() + 1024);
    prompt.push_str(original);
    prompt.push_str("\n\n## Correction\n\n");

    if max_echo_chars > 0 {
        let echoed: String = rejected.chars().take(max_echo_chars).collect();
        prompt.push_str("Your previous response was:\n---\n");
        prompt.push_str(&echoed);
        if echoed.len() < rejected.len() {
            prompt.push_str("\n[truncated]");
        }
        prompt.push_str("\n---\n\n");
    }

    prompt.push_str(&format!(
        "It was rejected by the {} check. Fix exactly these problems and return the complete corrected JSON object:\n",
        error.class
    ));
    for hint in error.repair_hints() {
        prompt.push_str("- ");
        prompt.push_str(&hint);
        prompt.push('\n');
    }
    prompt
}

const ANALYSIS_INSTRUCTIONS: &str = r#"You are an expert legal negotiation advisor analyzing contract clauses from different stakeholder perspectives.

## Task

1. Choose ONE observer perspective from the options given below
2. Generate 2-4 clause variations representing different negotiation positions
3. For each variation, give 2-5 key claims with confidence, attitude, type and evidence
4. Compare the variations and give strategic recommendations"#;

const REASONING_GUIDANCE: &str = r#"## Reasoning

- FACT claims state what a variation does (duration, scope, obligations). Use high or certain confidence and cite legal_precedent, statute, industry_practice or data.
- VALUE claims judge whether a feature is good or bad for the observer. Use approve or disapprove and cite risk, economic or observation evidence.
- POLICY claims recommend a negotiation move and build on the fact and value claims.
- Rank variations from 1 (most preferred by the observer) upward with no ties; value_score (0-100) should fall as rank rises.
- Link claims with supports, attacks, explains or equivalent. Inside a variation refer to claims as 1, 2, 3; across variations as A1, B2."#;

const OUTPUT_FORMAT: &str = r#"## Output format (JSON object only, no additional text)

{
  "original_clause": "the clause text",
  "context": {"observer_role": "Employee", "observer_interests": "what the observer wants"},
  "variations": [
    {
      "variation_id": "A",
      "variation_text": "modified clause text",
      "rank": 1,
      "value_score": 85,
      "key_claims": [
        {
          "claim_text": "12 months is within the typical enforceability range",
          "confidence": "high",
          "attitude": "neutral",
          "claim_type": "fact",
          "evidence": [{"source": "industry_practice", "strength": "strong"}]
        }
      ],
      "links": [{"from_claim": "1", "relation": "supports", "to_claim": "2"}],
      "key_advantages": ["..."],
      "key_disadvantages": ["..."],
      "enforceability_risk": "low",
      "business_risk": "moderate",
      "explanation": "prose synthesis of the reasoning"
    }
  ],
  "comparative_reasoning": {
    "key_tradeoffs": ["..."],
    "strategic_recommendations": ["..."],
    "overall_assessment": "...",
    "links": []
  }
}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;
