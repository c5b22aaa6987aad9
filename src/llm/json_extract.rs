// ABOUTME: Extracts a JSON object from a possibly fenced, possibly chatty LLM response
// ABOUTME: Strips markdown code fences and trims to the first {..last} brace span
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured-output recovery (spec.md §4.4): LLMs routinely wrap JSON
//! in markdown fences or precede it with chatty preamble. This module
//! strips fences, then trims to the substring from the first `{` to
//! the last `}`, and finally attempts to decode it as `T`.

use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Strip a leading/trailing ` ```json ` or ` ``` ` fence, if present.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Extract the substring spanning the first `{` to the last `}` in `text`.
///
/// # Errors
///
/// Returns [`AppError::Parse`] if `text` contains no `{` or no `}`
/// after the first `{`.
pub fn extract_json_object(text: &str) -> Result<&str, AppError> {
    let start = text
        .find('{')
        .ok_or_else(|| AppError::Parse("no '{' found in LLM response".to_owned()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| AppError::Parse("no '}' found in LLM response".to_owned()))?;
    if end < start {
        return Err(AppError::Parse(
            "malformed LLM response: '}' precedes '{'".to_owned(),
        ));
    }
    Ok(&text[start..=end])
}

/// Strip fences, extract the first `{...}` span, and decode it as `T`.
///
/// # Errors
///
/// Returns [`AppError::Parse`] if no JSON object could be located or
/// the located span does not decode as `T`.
pub fn decode_json_object<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    let stripped = strip_code_fences(text);
    let json_span = extract_json_object(stripped)?;
    serde_json::from_str(json_span)
        .map_err(|e| AppError::Parse(format!("failed to decode JSON object: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        a: u32,
    }

    #[test]
    fn strips_fenced_json_block() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn strips_bare_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn extracts_object_amid_preamble_and_postamble() {
        let raw = "Sure! Here you go:\n{\"a\": 1}\nHope that helps.";
        assert_eq!(extract_json_object(raw).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn decodes_fenced_object() {
        let raw = "```json\n{\"a\": 42}\n```";
        let decoded: Sample = decode_json_object(raw).unwrap();
        assert_eq!(decoded, Sample { a: 42 });
    }

    #[test]
    fn errors_when_no_brace_present() {
        let raw = "no json here";
        assert!(extract_json_object(raw).is_err());
    }

    #[test]
    fn handles_nested_objects_by_spanning_outermost_braces() {
        let raw = "{\"a\": 1, \"nested\": {\"b\": 2}}";
        let decoded: serde_json::Value = decode_json_object(raw).unwrap();
        assert_eq!(decoded["nested"]["b"], 2);
    }
}
