//! Building typed values from candidate JSON
//!
//! One pass reads every field, records presence and membership violations,
//! and yields the typed value only when nothing was wrong.

use chrono::{DateTime, NaiveDateTime, Utc};
use parley_domain::{
    ArgumentLink, Attitude, Claim, ClaimType, ComparativeReasoning, Confidence, Evidence,
    EvidenceCitation, EvidenceSource, EvidenceStrength, NegotiationAnalysis, NegotiationContext,
    RelationType, SourceClause, Variation,
};
use serde_json::Value;

use crate::config::EvidenceMode;
use crate::reader::{child, element, json_kind, Object, Reader};

/// Keys of the source clause that are read rather than passed through
const CLAUSE_FIELDS: [&str; 6] = [
    "clause",
    "date",
    "area_of_law",
    "location",
    "industry",
    "clause_type",
];

/// Analysis, clause and timestamp of a record, before the content key check
pub(crate) struct RecordParts {
    pub(crate) clause: SourceClause,
    pub(crate) analysis: NegotiationAnalysis,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) stored_hash: Option<String>,
}

pub(crate) struct Assembler<'r> {
    reader: &'r mut Reader,
    mode: EvidenceMode,
}

/// Collect per-item results, keeping the list only when every item succeeded
fn all<T>(items: Vec<Option<T>>) -> Option<Vec<T>> {
    items.into_iter().collect()
}

/// Flatten any evidence value into a readable summary
fn describe(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(describe)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" + "),
        Value::Object(obj) => {
            let source = obj.get("source").map(describe).unwrap_or_default();
            let strength = obj.get("strength").map(describe).unwrap_or_default();
            match (source.is_empty(), strength.is_empty()) {
                (false, false) => format!("{} ({})", source, strength),
                (false, true) => source,
                _ => value.to_string(),
            }
        }
        other => other.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

impl<'r> Assembler<'r> {
    pub(crate) fn new(reader: &'r mut Reader, mode: EvidenceMode) -> Self {
        Self { reader, mode }
    }

    fn citations(&mut self, items: &[Value], path: &str) -> Option<Vec<EvidenceCitation>> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let citation_path = element(path, "evidence", i);
            let Some(obj) = self
                .reader
                .as_object(item, path, &format!("evidence[{}]", i))
            else {
                out.push(None);
                continue;
            };
            let source = self
                .reader
                .enumerated::<EvidenceSource>(obj, &citation_path, "source");
            let strength = self
                .reader
                .enumerated::<EvidenceStrength>(obj, &citation_path, "strength");
            let description = self.reader.optional_string(obj, &citation_path, "description");
            out.push(match (source, strength, description) {
                (Some(source), Some(strength), Some(description)) => Some(EvidenceCitation {
                    source,
                    strength,
                    description,
                }),
                _ => None,
            });
        }
        all(out)
    }

    fn strict_evidence(&mut self, obj: &Object, path: &str) -> Option<Evidence> {
        let mut freeform_given = false;
        if let Some(summary) = obj.get("evidence_summary").filter(|v| !v.is_null()) {
            self.reader.mismatch(
                path,
                "evidence_summary",
                "structured evidence array",
                &format!("freeform {}", json_kind(summary)),
            );
            freeform_given = true;
        }

        let evidence = match obj.get("evidence") {
            None | Some(Value::Null) => Some(Evidence::none()),
            Some(Value::Array(items)) => self.citations(items, path).map(Evidence::Structured),
            Some(other) => {
                self.reader
                    .mismatch(path, "evidence", "array of citations", json_kind(other));
                None
            }
        };

        if freeform_given {
            None
        } else {
            evidence
        }
    }

    /// Never records a violation: unusable evidence degrades to a summary
    fn loose_evidence(&mut self, obj: &Object, path: &str) -> Evidence {
        let evidence = obj.get("evidence").filter(|v| !v.is_null());

        if let Some(Value::Array(items)) = evidence {
            let mut scratch = Reader::new();
            let parsed = Assembler::new(&mut scratch, EvidenceMode::Strict).citations(items, path);
            if let Some(citations) = parsed.filter(|c| !c.is_empty()) {
                if scratch.violations.is_empty() {
                    return Evidence::Structured(citations);
                }
            }
        }

        let summary = obj
            .get("evidence_summary")
            .map(describe)
            .filter(|s| !s.is_empty());
        if let Some(summary) = summary {
            return Evidence::Freeform(summary);
        }

        match evidence.map(describe).filter(|s| !s.is_empty()) {
            Some(degraded) => Evidence::Freeform(degraded),
            None => Evidence::none(),
        }
    }

    fn claim(&mut self, obj: &Object, path: &str) -> Option<Claim> {
        let claim_id = self.reader.optional_string(obj, path, "claim_id");
        let role = self.reader.optional_string(obj, path, "role");
        let claim_text = self.reader.string(obj, path, "claim_text");
        let confidence = self.reader.enumerated::<Confidence>(obj, path, "confidence");
        let attitude = self.reader.enumerated::<Attitude>(obj, path, "attitude");
        let claim_type = self.reader.enumerated::<ClaimType>(obj, path, "claim_type");
        let evidence = match self.mode {
            EvidenceMode::Strict => self.strict_evidence(obj, path),
            EvidenceMode::Loose => Some(self.loose_evidence(obj, path)),
        };

        Some(Claim {
            claim_id: claim_id?,
            role: role?,
            claim_text: claim_text?,
            confidence: confidence?,
            attitude: attitude?,
            claim_type: claim_type?,
            evidence: evidence?,
        })
    }

    fn link(&mut self, obj: &Object, path: &str) -> Option<ArgumentLink> {
        let from_claim = self.reader.identifier(obj, path, "from_claim");
        let relation = self.reader.enumerated::<RelationType>(obj, path, "relation");
        let to_claim = self.reader.identifier(obj, path, "to_claim");
        let explanation = self.reader.optional_string(obj, path, "explanation");

        Some(ArgumentLink {
            from_claim: from_claim?,
            to_claim: to_claim?,
            relation: relation?,
            explanation: explanation?,
        })
    }

    /// Read `field` as a list of objects, each handed to `read`
    fn objects<T>(
        &mut self,
        items: &[Value],
        path: &str,
        field: &str,
        mut read: impl FnMut(&mut Self, &Object, &str) -> Option<T>,
    ) -> Option<Vec<T>> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let item_path = element(path, field, i);
            out.push(
                self.reader
                    .as_object(item, path, &format!("{}[{}]", field, i))
                    .and_then(|obj| read(self, obj, &item_path)),
            );
        }
        all(out)
    }

    fn links(&mut self, obj: &Object, path: &str) -> Option<Vec<ArgumentLink>> {
        let items = self.reader.optional_array(obj, path, "links")?;
        self.objects(items, path, "links", Self::link)
    }

    fn variation(&mut self, obj: &Object, path: &str) -> Option<Variation> {
        let variation_id = self.reader.identifier(obj, path, "variation_id");
        let variation_text = self.reader.string(obj, path, "variation_text");
        let rank = self.reader.rank(obj, path, "rank");
        let value_score = self.reader.bounded_number(obj, path, "value_score", 0.0, 100.0);

        // Older records nest the reasoning under "analysis"
        let nested = match obj.get("analysis") {
            Some(Value::Object(inner)) if !obj.contains_key("key_claims") => Some(inner),
            _ => None,
        };
        let body_path = match nested {
            Some(_) => child(path, "analysis"),
            None => path.to_string(),
        };
        let body = nested.unwrap_or(obj);

        let key_claims = self
            .reader
            .array(body, &body_path, "key_claims")
            .and_then(|items| self.objects(items, &body_path, "key_claims", Self::claim));
        let links = self.links(body, &body_path);
        let key_advantages = self.reader.string_list(body, &body_path, "key_advantages");
        let key_disadvantages = self.reader.string_list(body, &body_path, "key_disadvantages");
        let enforceability_risk = self.reader.risk(body, &body_path, "enforceability_risk");
        let business_risk = self.reader.risk(body, &body_path, "business_risk");
        let explanation = self.reader.string(body, &body_path, "explanation");

        Some(Variation {
            variation_id: variation_id?,
            variation_text: variation_text?,
            rank: rank?,
            value_score: value_score?,
            key_claims: key_claims?,
            links: links?,
            key_advantages: key_advantages?,
            key_disadvantages: key_disadvantages?,
            enforceability_risk: enforceability_risk?,
            business_risk: business_risk?,
            explanation: explanation?,
        })
    }

    fn context(&mut self, obj: &Object, path: &str) -> Option<NegotiationContext> {
        let context = self.reader.object(obj, path, "context")?;
        let path = child(path, "context");
        let observer_role = self.reader.string(context, &path, "observer_role");
        let observer_interests = self.reader.string(context, &path, "observer_interests");
        Some(NegotiationContext {
            observer_role: observer_role?,
            observer_interests: observer_interests?,
        })
    }

    fn comparative(&mut self, obj: &Object, path: &str) -> Option<ComparativeReasoning> {
        let comparative = self.reader.object(obj, path, "comparative_reasoning")?;
        let path = child(path, "comparative_reasoning");
        let key_tradeoffs = self.reader.string_list(comparative, &path, "key_tradeoffs");
        let strategic_recommendations =
            self.reader
                .string_list(comparative, &path, "strategic_recommendations");
        let overall_assessment = self.reader.string(comparative, &path, "overall_assessment");
        let links = self.links(comparative, &path);

        Some(ComparativeReasoning {
            key_tradeoffs: key_tradeoffs?,
            strategic_recommendations: strategic_recommendations?,
            overall_assessment: overall_assessment?,
            links: links?,
        })
    }

    pub(crate) fn analysis(&mut self, obj: &Object, path: &str) -> Option<NegotiationAnalysis> {
        let original_clause = self.reader.string(obj, path, "original_clause");
        let context = self.context(obj, path);
        let variations = self
            .reader
            .array(obj, path, "variations")
            .and_then(|items| self.objects(items, path, "variations", Self::variation));
        let comparative_reasoning = self.comparative(obj, path);

        Some(NegotiationAnalysis {
            original_clause: original_clause?,
            context: context?,
            variations: variations?,
            comparative_reasoning: comparative_reasoning?,
        })
    }

    fn source_clause(&mut self, obj: &Object) -> Option<SourceClause> {
        let clause_obj = self.reader.object(obj, "", "original_clause_data")?;
        let path = "original_clause_data";
        let [clause, date, area_of_law, location, industry, clause_type] =
            CLAUSE_FIELDS.map(|field| self.reader.text(clause_obj, path, field));

        let extra = clause_obj
            .iter()
            .filter(|(key, _)| !CLAUSE_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(SourceClause {
            clause: clause?,
            date: date?,
            area_of_law: area_of_law?,
            location: location?,
            industry: industry?,
            clause_type: clause_type?,
            extra,
        })
    }

    pub(crate) fn record(&mut self, obj: &Object) -> Option<RecordParts> {
        let stored_hash = self.reader.optional_string(obj, "", "clause_hash");
        let clause = self.source_clause(obj);
        let analysis = self
            .reader
            .object(obj, "", "negotiation_analysis")
            .and_then(|a| self.analysis(a, "negotiation_analysis"));
        let timestamp = self.reader.string(obj, "", "timestamp").and_then(|raw| {
            let parsed = parse_timestamp(&raw);
            if parsed.is_none() {
                self.reader
                    .mismatch("", "timestamp", "RFC 3339 timestamp", "unparseable string");
            }
            parsed
        });

        Some(RecordParts {
            clause: clause?,
            analysis: analysis?,
            timestamp: timestamp?,
            stored_hash: stored_hash?,
        })
    }
}
