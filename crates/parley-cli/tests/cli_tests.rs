//! Dataset-level tests for the CLI commands

use parley_cli::cli::InspectFormat;
use parley_cli::commands::inspect::render;
use parley_cli::commands::run_generation;
use parley_cli::commands::validate::{check_lines, summarize};
use parley_cli::dataset::{existing_keys, read_clauses, read_lines};
use parley_cli::Formatter;
use parley_domain::{Record, SourceClause};
use parley_gatekeeper::{Gatekeeper, ValidationConfig};
use parley_generator::{Generator, GeneratorConfig};
use parley_llm::MockProvider;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

fn clause_json(n: usize) -> Value {
    json!({
        "clause": format!("Licensee shall pay royalties within {} days.", 30 + n),
        "date": "2021-09-01",
        "area_of_law": "Intellectual Property",
        "location": "Delaware",
        "industry": "Media",
        "clause_type": "License Agreement"
    })
}

fn analysis() -> Value {
    let claim = |text: &str| {
        json!({
            "claim_text": text,
            "confidence": "moderate",
            "attitude": "approve",
            "claim_type": "fact",
            "evidence": [{"source": "statute", "strength": "strong"}]
        })
    };
    let variation = |id: &str, rank: u32, score: f64| {
        json!({
            "variation_id": id,
            "variation_text": "Licensee shall pay royalties within 45 days.",
            "rank": rank,
            "value_score": score,
            "key_claims": [claim("Longer terms ease cash flow"), claim("Late fees still apply")],
            "links": [{"from_claim": "2", "relation": "explains", "to_claim": "1"}],
            "key_advantages": ["More time"],
            "key_disadvantages": ["Licensor waits longer"],
            "enforceability_risk": "low",
            "business_risk": "low",
            "explanation": "Extends the payment window."
        })
    };
    json!({
        "original_clause": "Licensee shall pay royalties within 30 days.",
        "context": {"observer_role": "Licensee", "observer_interests": "Cash flow"},
        "variations": [variation("A", 1, 70.0), variation("B", 2, 40.0)],
        "comparative_reasoning": {
            "key_tradeoffs": ["Time against goodwill"],
            "strategic_recommendations": ["Lead with A"],
            "overall_assessment": "A is the better opening."
        }
    })
}

fn write_clauses(path: &Path, count: usize) {
    let lines: Vec<String> = (0..count).map(|n| clause_json(n).to_string()).collect();
    fs::write(path, lines.join("\n") + "\n").unwrap();
}

fn generator(llm: MockProvider) -> Generator<MockProvider> {
    Generator::new(llm, Gatekeeper::default(), GeneratorConfig::default()).unwrap()
}

#[tokio::test]
async fn test_generation_writes_one_line_per_clause() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clauses.jsonl");
    let output = dir.path().join("out/dataset.jsonl");
    write_clauses(&input, 3);

    let llm = MockProvider::new(analysis().to_string());
    let clauses = read_clauses(&input, 0, None).unwrap();
    let summary = run_generation(&generator(llm.clone()), &clauses, &output, true, &Formatter::new(false))
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(llm.call_count(), 3);

    let lines = read_lines(&output).unwrap();
    assert_eq!(lines.len(), 3);
    let record = Gatekeeper::default().validate_str(&lines[1].text).unwrap().value;
    assert_eq!(record.original_clause_data.clause, "Licensee shall pay royalties within 31 days.");
    assert_eq!(record.clause_hash, clauses[1].content_key());
}

#[tokio::test]
async fn test_resume_skips_clauses_already_written() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clauses.jsonl");
    let output = dir.path().join("dataset.jsonl");
    write_clauses(&input, 4);
    let formatter = Formatter::new(false);

    let first = read_clauses(&input, 0, Some(2)).unwrap();
    run_generation(&generator(MockProvider::new(analysis().to_string())), &first, &output, true, &formatter)
        .await
        .unwrap();

    let llm = MockProvider::new(analysis().to_string());
    let all = read_clauses(&input, 0, None).unwrap();
    let summary = run_generation(&generator(llm.clone()), &all, &output, true, &formatter)
        .await
        .unwrap();

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(llm.call_count(), 2);
    assert_eq!(existing_keys(&output).unwrap().len(), 4);
    assert_eq!(read_lines(&output).unwrap().len(), 4);
}

#[tokio::test]
async fn test_no_resume_processes_everything_again() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clauses.jsonl");
    let output = dir.path().join("dataset.jsonl");
    write_clauses(&input, 2);
    let formatter = Formatter::new(false);
    let clauses = read_clauses(&input, 0, None).unwrap();

    run_generation(&generator(MockProvider::new(analysis().to_string())), &clauses, &output, true, &formatter)
        .await
        .unwrap();
    let summary = run_generation(&generator(MockProvider::new(analysis().to_string())), &clauses, &output, false, &formatter)
        .await
        .unwrap();

    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(read_lines(&output).unwrap().len(), 4);
}

#[tokio::test]
async fn test_failed_clause_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clauses.jsonl");
    let output = dir.path().join("dataset.jsonl");
    write_clauses(&input, 3);

    let llm = MockProvider::new(analysis().to_string());
    llm.push_error("connection refused");
    let clauses = read_clauses(&input, 0, None).unwrap();
    let summary = run_generation(&generator(llm), &clauses, &output, true, &Formatter::new(false))
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 2);

    let written: Vec<SourceClause> = read_lines(&output)
        .unwrap()
        .iter()
        .map(|line| {
            let mut record: Value = serde_json::from_str(&line.text).unwrap();
            serde_json::from_value(record["original_clause_data"].take()).unwrap()
        })
        .collect();
    assert_eq!(written, clauses[1..].to_vec());
}

#[tokio::test]
async fn test_validate_flags_tampered_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clauses.jsonl");
    let output = dir.path().join("dataset.jsonl");
    write_clauses(&input, 2);

    let clauses = read_clauses(&input, 0, None).unwrap();
    run_generation(&generator(MockProvider::new(analysis().to_string())), &clauses, &output, true, &Formatter::new(false))
        .await
        .unwrap();

    let mut lines = read_lines(&output).unwrap();
    let mut tampered: Value = serde_json::from_str(&lines[1].text).unwrap();
    tampered["negotiation_analysis"]["variations"][0]["business_risk"] = json!("extreme");
    lines[1].text = tampered.to_string();

    let reports = check_lines(&lines, &Gatekeeper::default());
    let summary = summarize(&reports);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);

    let rejection = reports[1].result.as_ref().unwrap_err();
    assert!(rejection.repair_hints()[0]
        .starts_with("negotiation_analysis.variations[0].business_risk: 'extreme' is not one of"));
}

#[test]
fn test_render_formats() {
    let clause: SourceClause = serde_json::from_value(clause_json(0)).unwrap();
    let accepted = Gatekeeper::new(ValidationConfig::loose())
        .validate_analysis(&analysis())
        .unwrap();
    let record = Record::new(clause, accepted.value);

    let compact = render(&record, InspectFormat::Compact, false).unwrap();
    assert!(compact.contains("within 30 days"));
    assert!(compact.contains("◐"));

    let hidden = render(&record, InspectFormat::Compact, true).unwrap();
    assert!(!hidden.contains("Delaware"));

    let json = render(&record, InspectFormat::Json, false).unwrap();
    let back = Gatekeeper::default().validate_str(&json).unwrap().value;
    assert_eq!(back, record);
}
