//! Integration tests for the Generator

#[cfg(test)]
mod tests {
    use crate::{Generator, GeneratorConfig, GeneratorError};
    use parley_domain::{Evidence, SourceClause};
    use parley_gatekeeper::{Gatekeeper, ValidationConfig, ViolationClass};
    use parley_llm::MockProvider;
    use serde_json::{json, Value};

    fn clause() -> SourceClause {
        serde_json::from_value(json!({
            "clause": "Employee shall not solicit any client of the Company for 24 months.",
            "date": "2023-06-12",
            "area_of_law": "Employment Law",
            "location": "California",
            "industry": "Software",
            "clause_type": "Non-Solicitation",
            "source_id": "soli-0042"
        }))
        .unwrap()
    }

    fn claim(text: &str, claim_type: &str) -> Value {
        json!({
            "claim_text": text,
            "confidence": "high",
            "attitude": "approve",
            "claim_type": claim_type,
            "evidence": [{"source": "industry_practice", "strength": "strong"}]
        })
    }

    fn analysis() -> Value {
        let variation = |id: &str, rank: u32, score: f64| {
            json!({
                "variation_id": id,
                "variation_text": "Employee shall not solicit clients for 12 months.",
                "rank": rank,
                "value_score": score,
                "key_claims": [
                    claim("12 months is within the typical range", "fact"),
                    claim("A shorter term preserves mobility", "value")
                ],
                "links": [{"from_claim": "1", "relation": "supports", "to_claim": "2"}],
                "key_advantages": ["Shorter restriction"],
                "key_disadvantages": ["Employer may resist"],
                "enforceability_risk": "low",
                "business_risk": "moderate",
                "explanation": "Balances protection and mobility."
            })
        };
        json!({
            "original_clause": "Employee shall not solicit any client of the Company for 24 months.",
            "context": {"observer_role": "Employee", "observer_interests": "Mobility"},
            "variations": [variation("A", 1, 80.0), variation("B", 2, 45.0)],
            "comparative_reasoning": {
                "key_tradeoffs": ["Duration against enforceability"],
                "strategic_recommendations": ["Propose A first"],
                "overall_assessment": "A serves the employee best."
            }
        })
    }

    fn generator(llm: MockProvider, validation: ValidationConfig) -> Generator<MockProvider> {
        Generator::new(llm, Gatekeeper::new(validation), GeneratorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_full_generation_flow() {
        let response = format!("```json\n{}\n```", analysis());
        let llm = MockProvider::new(response);
        let generated = generator(llm.clone(), ValidationConfig::strict())
            .generate(&clause())
            .await
            .unwrap();

        assert_eq!(generated.attempts, 1);
        assert!(generated.warnings.is_empty());
        assert_eq!(generated.record.clause_hash, clause().content_key());
        assert_eq!(generated.record.original_clause_data.extra["source_id"], "soli-0042");
        assert_eq!(generated.record.negotiation_analysis.variations.len(), 2);

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Observer options: Employer, Employee"));
        assert!(prompt.contains("for 24 months"));
    }

    #[tokio::test]
    async fn test_repair_after_missing_field() {
        let mut broken = analysis();
        broken["variations"][0]["key_claims"][1]
            .as_object_mut()
            .unwrap()
            .remove("claim_type");

        let llm = MockProvider::with_responses([broken.to_string(), analysis().to_string()]);
        let generated = generator(llm.clone(), ValidationConfig::strict())
            .generate(&clause())
            .await
            .unwrap();

        assert_eq!(generated.attempts, 2);
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].starts_with(&prompts[0]));
        assert!(prompts[1].contains("- variations[0].key_claims[1].claim_type: missing required field"));
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let mut broken = analysis();
        broken["variations"][1]["rank"] = json!(1);

        let llm = MockProvider::new(broken.to_string());
        let err = generator(llm.clone(), ValidationConfig::strict())
            .generate(&clause())
            .await
            .unwrap_err();

        match err {
            GeneratorError::RetriesExhausted { attempts, last } => {
                assert_eq!(attempts, 3);
                assert_eq!(last.class, ViolationClass::Integrity);
                assert_eq!(last.count("DuplicateRank"), 1);
            }
            other => panic!("Expected RetriesExhausted, got {:?}", other),
        }
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn test_freeform_evidence_in_loose_mode() {
        let mut freeform = analysis();
        let first = freeform["variations"][0]["key_claims"][0].as_object_mut().unwrap();
        first.remove("evidence");
        first.insert("evidence_summary".to_string(), json!("statute + case law"));

        let loose = generator(MockProvider::new(freeform.to_string()), ValidationConfig::loose())
            .generate(&clause())
            .await
            .unwrap();
        assert_eq!(
            loose.record.negotiation_analysis.variations[0].key_claims[0].evidence,
            Evidence::Freeform("statute + case law".to_string())
        );

        let strict = generator(MockProvider::new(freeform.to_string()), ValidationConfig::strict())
            .generate(&clause())
            .await;
        assert!(matches!(strict, Err(GeneratorError::RetriesExhausted { .. })));
    }

    #[tokio::test]
    async fn test_warnings_are_carried() {
        let mut inverted = analysis();
        inverted["variations"][1]["value_score"] = json!(95.0);

        let generated = generator(MockProvider::new(inverted.to_string()), ValidationConfig::strict())
            .generate(&clause())
            .await
            .unwrap();
        assert_eq!(generated.warnings.len(), 1);
        assert_eq!(generated.warnings[0].kind(), "ScoreRankInversion");
    }

    #[tokio::test]
    async fn test_record_keeps_source_clause_text() {
        let mut paraphrased = analysis();
        paraphrased["original_clause"] = json!("Totally different clause text.");

        let generated = generator(MockProvider::new(paraphrased.to_string()), ValidationConfig::strict())
            .generate(&clause())
            .await
            .unwrap();
        assert_eq!(generated.record.negotiation_analysis.original_clause, clause().clause);

        let line = serde_json::to_string(&generated.record).unwrap();
        let reread = Gatekeeper::default_config().validate_str(&line).unwrap();
        assert!(reread.is_clean());
    }
}
