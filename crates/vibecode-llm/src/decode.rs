//! Turning provider text into a [`CodeBundle`].
//!
//! Models do not always honour the "return a JSON object" instruction. The
//! decoder first tries a strict JSON decode and then scans the text for
//! fenced code blocks and HTML/CSS-shaped regions. JSON that is not a bundle
//! is rejected outright, as is prose in which the scan finds nothing.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use vibecode_core::{CodeBundle, GenerationKind};

use crate::error::{LLMError, Result};

lazy_static! {
    static ref JSON_FENCE: Regex =
        Regex::new(r"(?is)^\s*```(?:json)?\s*\n(.*?)\n\s*```\s*$").expect("valid regex");
    static ref ANY_FENCE: Regex = Regex::new(r"(?s)```.*?```").expect("valid regex");
    static ref HTML_FENCE: Regex =
        Regex::new(r"(?is)```html\r?\n(.*?)\r?\n```").expect("valid regex");
    static ref HTML_DOCUMENT: Regex = Regex::new(r"(?is)<html.*</html>").expect("valid regex");
    static ref CSS_FENCE: Regex = Regex::new(r"(?is)```css\r?\n(.*?)\r?\n```").expect("valid regex");
    static ref CSS_BLOCK: Regex =
        Regex::new(r"(?s)/\*.*?\*/|[^{}]*\{[^{}]*\}").expect("valid regex");
    static ref JS_FENCE: Regex =
        Regex::new(r"(?is)```(?:javascript|js)\r?\n(.*?)\r?\n```").expect("valid regex");
}

#[derive(Debug, Deserialize)]
struct RawBundle {
    html: Option<String>,
    css: Option<String>,
    #[serde(alias = "js")]
    javascript: Option<String>,
}

/// Decode provider output for the requested kind.
pub fn decode_bundle(kind: GenerationKind, content: &str) -> Result<CodeBundle> {
    match kind {
        GenerationKind::FullApp => decode_full_app(content),
        single => Ok(CodeBundle::single(single, content)),
    }
}

fn decode_full_app(content: &str) -> Result<CodeBundle> {
    // Structured JSON is never handed to the prose heuristics.
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(strip_fence(content)) {
        if value.is_object() || value.is_array() {
            return decode_json_bundle(value);
        }
    }

    log::debug!("Provider output is not a JSON bundle, scanning for code regions");
    extract_code_regions(content).ok_or_else(|| {
        LLMError::Decode("no html, css or javascript found in provider output".to_string())
    })
}

fn decode_json_bundle(value: serde_json::Value) -> Result<CodeBundle> {
    if !value.is_object() {
        return Err(LLMError::Decode("JSON response is not an object".to_string()));
    }

    let raw: RawBundle = serde_json::from_value(value)
        .map_err(|e| LLMError::Decode(format!("JSON response is not a code bundle: {e}")))?;
    if raw.html.is_none() && raw.css.is_none() && raw.javascript.is_none() {
        return Err(LLMError::Decode(
            "JSON response has no html, css or javascript field".to_string(),
        ));
    }

    Ok(CodeBundle::new(
        raw.html.unwrap_or_default(),
        raw.css.unwrap_or_default(),
        raw.javascript.unwrap_or_default(),
    ))
}

/// Heuristic extraction. Fenced blocks win; the loose HTML document and CSS
/// rule patterns only look at text outside fences so a script block is never
/// mistaken for a stylesheet.
pub fn extract_code_regions(text: &str) -> Option<CodeBundle> {
    let unfenced = ANY_FENCE.replace_all(text, "");

    let markup = capture(&HTML_FENCE, text)
        .or_else(|| HTML_DOCUMENT.find(&unfenced).map(|m| m.as_str().to_string()))
        .unwrap_or_default();
    let styles = capture(&CSS_FENCE, text)
        .or_else(|| {
            // A bare HTML document is not a stylesheet.
            let outside_html = HTML_DOCUMENT.replace_all(&unfenced, "");
            CSS_BLOCK
                .find(&outside_html)
                .map(|m| m.as_str().trim().to_string())
        })
        .unwrap_or_default();
    let script = capture(&JS_FENCE, text).unwrap_or_default();

    if markup.is_empty() && styles.is_empty() && script.is_empty() {
        return None;
    }

    Some(CodeBundle::new(markup, styles, script))
}

/// Decode a suggestion list: a JSON string array, or an object with a
/// `suggestions` array.
pub fn decode_suggestions(content: &str) -> Result<Vec<String>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SuggestionPayload {
        List(Vec<String>),
        Wrapped { suggestions: Vec<String> },
    }

    match serde_json::from_str::<SuggestionPayload>(strip_fence(content))? {
        SuggestionPayload::List(list) | SuggestionPayload::Wrapped { suggestions: list } => Ok(list),
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.trim().is_empty())
}

fn strip_fence(content: &str) -> &str {
    JSON_FENCE
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(content)
        .trim()
}
