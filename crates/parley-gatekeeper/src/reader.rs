//! Field access over untrusted JSON that records violations instead of failing
//!
//! Every accessor returns `None` when the value cannot be used, and in that
//! case has already recorded exactly one violation for it.

use parley_domain::{RiskLevel, Symbolic};
use serde_json::{Map, Value};

use crate::violation::Violation;

pub(crate) type Object = Map<String, Value>;

/// JSON type name for diagnostics
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Path of an array element inside its parent
pub(crate) fn element(path: &str, field: &str, index: usize) -> String {
    if path.is_empty() {
        format!("{}[{}]", field, index)
    } else {
        format!("{}.{}[{}]", path, field, index)
    }
}

/// Path of a nested object
pub(crate) fn child(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Reader {
    pub(crate) violations: Vec<Violation>,
}

impl Reader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub(crate) fn missing(&mut self, path: &str, field: &str) {
        self.push(Violation::MissingField {
            path: path.to_string(),
            field: field.to_string(),
        });
    }

    pub(crate) fn mismatch(&mut self, path: &str, field: &str, expected: &str, found: &str) {
        self.push(Violation::StructuralMismatch {
            path: path.to_string(),
            field: field.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }

    /// Present and not null
    fn present<'v>(&mut self, obj: &'v Object, path: &str, field: &str) -> Option<&'v Value> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.missing(path, field);
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Treat a value as an object, recording a mismatch otherwise
    pub(crate) fn as_object<'v>(
        &mut self,
        value: &'v Value,
        path: &str,
        field: &str,
    ) -> Option<&'v Object> {
        match value {
            Value::Object(obj) => Some(obj),
            other => {
                self.mismatch(path, field, "object", json_kind(other));
                None
            }
        }
    }

    pub(crate) fn object<'v>(&mut self, obj: &'v Object, path: &str, field: &str) -> Option<&'v Object> {
        let value = self.present(obj, path, field)?;
        self.as_object(value, path, field)
    }

    pub(crate) fn array<'v>(&mut self, obj: &'v Object, path: &str, field: &str) -> Option<&'v [Value]> {
        match self.present(obj, path, field)? {
            Value::Array(items) => Some(items),
            other => {
                self.mismatch(path, field, "array", json_kind(other));
                None
            }
        }
    }

    /// Absent or null reads as an empty list
    pub(crate) fn optional_array<'v>(
        &mut self,
        obj: &'v Object,
        path: &str,
        field: &str,
    ) -> Option<&'v [Value]> {
        match obj.get(field) {
            None | Some(Value::Null) => Some(&[]),
            Some(Value::Array(items)) => Some(items),
            Some(other) => {
                self.mismatch(path, field, "array", json_kind(other));
                None
            }
        }
    }

    /// Required non-blank string
    pub(crate) fn string(&mut self, obj: &Object, path: &str, field: &str) -> Option<String> {
        match self.present(obj, path, field)? {
            Value::String(s) if s.trim().is_empty() => {
                self.missing(path, field);
                None
            }
            Value::String(s) => Some(s.clone()),
            other => {
                self.mismatch(path, field, "string", json_kind(other));
                None
            }
        }
    }

    /// Required string that may be blank (opaque metadata)
    pub(crate) fn text(&mut self, obj: &Object, path: &str, field: &str) -> Option<String> {
        match self.present(obj, path, field)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.mismatch(path, field, "string", json_kind(other));
                None
            }
        }
    }

    /// Required identifier; numbers are accepted and stringified
    pub(crate) fn identifier(&mut self, obj: &Object, path: &str, field: &str) -> Option<String> {
        match self.optional_string(obj, path, field)? {
            Some(id) => Some(id),
            None => {
                self.missing(path, field);
                None
            }
        }
    }

    /// Optional identifier-like string; numbers are accepted and stringified
    ///
    /// The outer `Option` is `None` only on a recorded mismatch.
    pub(crate) fn optional_string(
        &mut self,
        obj: &Object,
        path: &str,
        field: &str,
    ) -> Option<Option<String>> {
        match obj.get(field) {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(s)) if s.trim().is_empty() => Some(None),
            Some(Value::String(s)) => Some(Some(s.trim().to_string())),
            Some(Value::Number(n)) => Some(Some(n.to_string())),
            Some(other) => {
                self.mismatch(path, field, "string", json_kind(other));
                None
            }
        }
    }

    /// Required array of strings
    pub(crate) fn string_list(&mut self, obj: &Object, path: &str, field: &str) -> Option<Vec<String>> {
        let items = self.array(obj, path, field)?;
        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => {
                    self.mismatch(path, &format!("{}[{}]", field, i), "string", json_kind(other));
                    ok = false;
                }
            }
        }
        ok.then_some(out)
    }

    /// Required number
    pub(crate) fn number(&mut self, obj: &Object, path: &str, field: &str) -> Option<f64> {
        match self.present(obj, path, field)? {
            Value::Number(n) => match n.as_f64() {
                Some(value) => Some(value),
                None => {
                    self.mismatch(path, field, "number", "unrepresentable number");
                    None
                }
            },
            other => {
                self.mismatch(path, field, "number", json_kind(other));
                None
            }
        }
    }

    /// Number within an inclusive range
    pub(crate) fn bounded_number(
        &mut self,
        obj: &Object,
        path: &str,
        field: &str,
        min: f64,
        max: f64,
    ) -> Option<f64> {
        let value = self.number(obj, path, field)?;
        if (min..=max).contains(&value) {
            Some(value)
        } else {
            self.push(Violation::OutOfRange {
                path: path.to_string(),
                field: field.to_string(),
                value: value.to_string(),
                bounds: format!("{} to {}", min, max),
            });
            None
        }
    }

    /// Positive integer rank
    pub(crate) fn rank(&mut self, obj: &Object, path: &str, field: &str) -> Option<u32> {
        let value = self.present(obj, path, field)?;
        let number = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            _ => None,
        };
        let Some(number) = number else {
            self.mismatch(path, field, "integer", json_kind(value));
            return None;
        };
        match u32::try_from(number) {
            Ok(rank) if rank >= 1 => Some(rank),
            _ => {
                self.push(Violation::OutOfRange {
                    path: path.to_string(),
                    field: field.to_string(),
                    value: number.to_string(),
                    bounds: "1 or greater".to_string(),
                });
                None
            }
        }
    }

    fn membership<T>(
        &mut self,
        obj: &Object,
        path: &str,
        field: &str,
        parse: impl Fn(&str) -> Option<T>,
        allowed: Vec<&'static str>,
    ) -> Option<T> {
        let raw = self.string(obj, path, field)?;
        let parsed = parse(&raw);
        if parsed.is_none() {
            self.push(Violation::InvalidEnumValue {
                path: path.to_string(),
                field: field.to_string(),
                value: raw,
                allowed,
            });
        }
        parsed
    }

    /// Required member of a registry family
    pub(crate) fn enumerated<T: Symbolic>(&mut self, obj: &Object, path: &str, field: &str) -> Option<T> {
        self.membership(obj, path, field, T::parse, T::allowed_values())
    }

    /// Required risk level
    pub(crate) fn risk(&mut self, obj: &Object, path: &str, field: &str) -> Option<RiskLevel> {
        self.membership(obj, path, field, RiskLevel::parse, RiskLevel::allowed_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_domain::Confidence;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_blank_string_is_missing() {
        let mut r = Reader::new();
        assert_eq!(r.string(&obj(json!({"a": "  "})), "p", "a"), None);
        assert!(matches!(r.violations[0], Violation::MissingField { .. }));
    }

    #[test]
    fn test_wrong_type_is_mismatch() {
        let mut r = Reader::new();
        assert_eq!(r.string(&obj(json!({"a": 3})), "p", "a"), None);
        assert_eq!(
            r.violations[0],
            Violation::StructuralMismatch {
                path: "p".to_string(),
                field: "a".to_string(),
                expected: "string".to_string(),
                found: "number".to_string(),
            }
        );
    }

    #[test]
    fn test_enum_membership() {
        let mut r = Reader::new();
        let o = obj(json!({"confidence": "High", "other": "lean_true"}));
        assert_eq!(r.enumerated::<Confidence>(&o, "", "confidence"), Some(Confidence::High));
        assert_eq!(r.enumerated::<Confidence>(&o, "", "other"), None);
        assert!(matches!(
            &r.violations[0],
            Violation::InvalidEnumValue { value, allowed, .. }
                if value == "lean_true" && allowed.len() == 5
        ));
    }

    #[test]
    fn test_rank_rules() {
        let mut r = Reader::new();
        let o = obj(json!({"a": 2, "b": 3.0, "c": 0, "d": 1.5, "e": "1"}));
        assert_eq!(r.rank(&o, "", "a"), Some(2));
        assert_eq!(r.rank(&o, "", "b"), Some(3));
        assert_eq!(r.rank(&o, "", "c"), None);
        assert_eq!(r.rank(&o, "", "d"), None);
        assert_eq!(r.rank(&o, "", "e"), None);
        let kinds: Vec<&str> = r.violations.iter().map(|v| v.kind()).collect();
        assert_eq!(kinds, vec!["OutOfRange", "StructuralMismatch", "StructuralMismatch"]);
    }

    #[test]
    fn test_string_list_reports_each_bad_element() {
        let mut r = Reader::new();
        let o = obj(json!({"items": ["a", 1, null]}));
        assert_eq!(r.string_list(&o, "v", "items"), None);
        assert_eq!(r.violations.len(), 2);
        assert!(r.violations[0].to_string().starts_with("v.items[1]"));
    }

    #[test]
    fn test_paths() {
        assert_eq!(element("variations[0]", "key_claims", 2), "variations[0].key_claims[2]");
        assert_eq!(element("", "variations", 1), "variations[1]");
        assert_eq!(child("", "context"), "context");
    }
}
