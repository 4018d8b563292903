//! Locate the JSON object in an LLM response

/// Extract the JSON object from a response
///
/// Handles a markdown code fence anywhere in the response, and prose around
/// a bare object. Text that contains no object is returned trimmed so that
/// validation reports it as malformed.
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```") {
        let fenced = &trimmed[start + 3..];
        // skip the language tag line
        let body = fenced.find('\n').map(|i| &fenced[i + 1..]).unwrap_or(fenced);
        let body = body.find("```").map(|end| &body[..end]).unwrap_or(body);
        return body.trim();
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(open), Some(close)) if open < close => &trimmed[open..=close],
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_plain_json() {
        let json = r#"{"key": "value"}"#;
        assert_eq!(extract_json(json), json);
    }

    #[test]
    fn test_extract_json_from_markdown() {
        let response = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_extract_json_after_preamble() {
        let response = "Here is the analysis:\n```\n{\"a\": 1}\n```\nLet me know.";
        assert_eq!(extract_json(response), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_json_from_prose() {
        let response = "Sure! {\"a\": {\"b\": 2}} Hope this helps.";
        assert_eq!(extract_json(response), r#"{"a": {"b": 2}}"#);
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(extract_json("```json\n{\"a\": 1}"), r#"{"a": 1}"#);
    }

    #[test]
    fn test_no_object() {
        assert_eq!(extract_json("  I cannot help with that. "), "I cannot help with that.");
    }
}
