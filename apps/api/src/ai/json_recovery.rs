//! Response normalizer: recovers one JSON value from noisy LLM output.
//!
//! Models sometimes wrap JSON in explanatory prose or markdown fences despite
//! instructions. Recovery order:
//! 1. direct parse of the whole text
//! 2. interior of the first fenced code block (```json or bare ```)
//! 3. the balanced span from the first `{` to its matching `}` (string-aware)
//!
//! Strategy 3 deliberately does NOT slice to the last `}` in the text. A
//! response carrying several JSON-like fragments would silently mis-parse
//! under that rule; scanning to the matching close brace accepts exactly one
//! well-formed object and rejects everything else.
//!
//! This layer is purely defensive parsing. It never panics and does no
//! semantic validation beyond what the caller's target type deserializes.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecoverError {
    #[error("no JSON object found in response")]
    NoJson,

    #[error("candidate JSON span has unbalanced braces")]
    Unbalanced,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Recovers a typed value from raw LLM text. Callers treat any error as
/// "the model produced unusable output" and apply a task-specific fallback.
pub fn recover<T: DeserializeOwned>(text: &str) -> Result<T, RecoverError> {
    let trimmed = text.trim();

    // 1. The whole response is valid JSON.
    if let Ok(value) = serde_json::from_str::<T>(trimmed) {
        return Ok(value);
    }

    // 2. JSON wrapped in a markdown code fence.
    if let Some(interior) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<T>(interior.trim()) {
            return Ok(value);
        }
    }

    // 3. Balanced object span embedded in prose.
    let span = balanced_object_span(trimmed)?;
    serde_json::from_str::<T>(span).map_err(RecoverError::Parse)
}

/// Returns the interior of the first ``` fence, skipping an optional
/// language tag on the opening line.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Drop the language tag (e.g. "json") up to the first newline.
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(&body[..end])
}

/// Finds the span from the first `{` to its matching `}`, tracking string
/// and escape state so braces inside string literals do not count.
fn balanced_object_span(text: &str) -> Result<&str, RecoverError> {
    let start = text.find('{').ok_or(RecoverError::NoJson)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    Err(RecoverError::Unbalanced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_direct_parse_returns_equivalent_value() {
        let input = r#"{"role": "Engineer", "level": 3}"#;
        let recovered: Value = recover(input).unwrap();
        let direct: Value = serde_json::from_str(input).unwrap();
        assert_eq!(recovered, direct);
    }

    #[test]
    fn test_fenced_json_block_recovers_interior() {
        let input = "Here is the result:\n```json\n{\"role\": \"Engineer\"}\n```\nDone.";
        let recovered: Value = recover(input).unwrap();
        let direct: Value = serde_json::from_str(r#"{"role": "Engineer"}"#).unwrap();
        assert_eq!(recovered, direct);
    }

    #[test]
    fn test_fence_without_language_tag() {
        let input = "```\n{\"ok\": true}\n```";
        let recovered: Value = recover(input).unwrap();
        assert_eq!(recovered["ok"], true);
    }

    #[test]
    fn test_plain_prose_returns_no_json_error() {
        let result: Result<Value, _> = recover("Sorry, I cannot help with that request.");
        assert!(matches!(result, Err(RecoverError::NoJson)));
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let input = "Sure! The analysis is {\"score\": 88} as requested.";
        let recovered: Value = recover(input).unwrap();
        assert_eq!(recovered["score"], 88);
    }

    #[test]
    fn test_multiple_fragments_take_first_balanced_object() {
        // A first-{-to-last-} slice would produce `{"a": 1} and {"b": 2}`,
        // which is not valid JSON. The balanced scan recovers the first object.
        let input = "Results: {\"a\": 1} and {\"b\": 2}";
        let recovered: Value = recover(input).unwrap();
        assert_eq!(recovered["a"], 1);
        assert!(recovered.get("b").is_none());
    }

    #[test]
    fn test_unbalanced_braces_are_rejected() {
        let result: Result<Value, _> = recover("partial output: {\"items\": [1, 2");
        assert!(matches!(result, Err(RecoverError::Unbalanced)));
    }

    #[test]
    fn test_braces_inside_strings_do_not_close_the_span() {
        let input = "note {\"text\": \"use {} braces}\", \"n\": 1} trailing";
        let recovered: Value = recover(input).unwrap();
        assert_eq!(recovered["n"], 1);
        assert_eq!(recovered["text"], "use {} braces}");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let input = "x {\"text\": \"she said \\\"hi}\\\"\", \"n\": 2}";
        let recovered: Value = recover(input).unwrap();
        assert_eq!(recovered["n"], 2);
    }

    #[test]
    fn test_nested_objects_balance() {
        let input = "out: {\"a\": {\"b\": {\"c\": 3}}} extra";
        let recovered: Value = recover(input).unwrap();
        assert_eq!(recovered["a"]["b"]["c"], 3);
    }

    #[test]
    fn test_typed_recovery_into_struct() {
        #[derive(serde::Deserialize)]
        struct Target {
            name: String,
        }
        let input = "```json\n{\"name\": \"Ada\"}\n```";
        let target: Target = recover(input).unwrap();
        assert_eq!(target.name, "Ada");
    }
}
