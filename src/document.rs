//! The persisted document: note text, sparse line statuses and settings.
//!
//! On disk the document is a JSON object:
//!
//! ```json
//! {
//!   "text": "buy milk\nwalk dog",
//!   "styles": { "2": "red" },
//!   "settings": { "bg_color": "#fdf6e3", "topmost": true }
//! }
//! ```

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::settings::Settings;
use crate::status::StatusKey;

/// Sparse map from 1-based line number to status; untagged lines are absent
pub type LineStatuses = BTreeMap<usize, StatusKey>;

/// Everything the pad persists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub text: String,
    pub line_status: LineStatuses,
    pub settings: Settings,
}

/// Borrowed view used for writing, so saving never clones the text
#[derive(Serialize)]
struct StateFile<'a> {
    text: &'a str,
    styles: &'a LineStatuses,
    settings: &'a Settings,
}

impl Document {
    pub fn new(text: impl Into<String>, line_status: LineStatuses, settings: Settings) -> Self {
        Self {
            text: text.into(),
            line_status,
            settings,
        }
    }

    /// Parse a state file.
    ///
    /// Fails only when the content is not a JSON object at all. Individual
    /// fields with the wrong shape fall back to their defaults.
    pub fn from_json(content: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(content).context("state file is not valid JSON")?;
        let Value::Object(root) = root else {
            bail!("state file root is not a JSON object");
        };

        let text = match root.get("text") {
            Some(Value::String(text)) => text.clone(),
            None | Some(Value::Null) => String::new(),
            Some(other) => {
                log::warn!("Ignoring non-string note text: {}", other);
                String::new()
            }
        };

        Ok(Self {
            text,
            line_status: parse_styles(root.get("styles")),
            settings: Settings::layered(root.get("settings")),
        })
    }

    /// Render the state file; non-ASCII text is written as-is
    pub fn to_json(&self) -> Result<String> {
        serialize_state(&self.text, &self.line_status, &self.settings)
    }

    pub fn line_count(&self) -> usize {
        line_count(&self.text)
    }
}

/// Serialize the three parts of a document without assembling one
pub fn serialize_state(text: &str, styles: &LineStatuses, settings: &Settings) -> Result<String> {
    let state = StateFile {
        text,
        styles,
        settings,
    };
    serde_json::to_string_pretty(&state).context("failed to serialize state")
}

/// Number of lines in `text`; the empty string is one (empty) line
pub fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

fn parse_styles(value: Option<&Value>) -> LineStatuses {
    let mut styles = LineStatuses::new();

    let map = match value {
        Some(Value::Object(map)) => map,
        None | Some(Value::Null) => return styles,
        Some(other) => {
            log::warn!("Ignoring line styles that are not an object: {}", other);
            return styles;
        }
    };

    for (key, value) in map {
        let line = key.trim().parse::<usize>().ok().filter(|line| *line >= 1);
        let status = serde_json::from_value::<StatusKey>(value.clone()).ok();

        match (line, status) {
            (Some(line), Some(status)) => {
                styles.insert(line, status);
            }
            _ => log::debug!("Skipping line style {:?} = {}", key, value),
        }
    }

    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lines_like_a_text_widget() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("one"), 1);
        assert_eq!(line_count("one\ntwo"), 2);
        assert_eq!(line_count("one\n"), 2);
    }

    #[test]
    fn skips_malformed_style_entries() {
        let doc = Document::from_json(
            r#"{"text": "a\nb\nc", "styles": {"1": "green", "0": "red", "x": "blue", "3": "pink", " 2 ": "yellow"}}"#,
        )
        .unwrap();

        let expected: LineStatuses = [(1, StatusKey::Green), (2, StatusKey::Yellow)]
            .into_iter()
            .collect();
        assert_eq!(doc.line_status, expected);
    }

    #[test]
    fn style_values_must_be_exact_status_names() {
        let doc = Document::from_json(
            r#"{"text": "a\nb\nc\nd", "styles": {"1": " RED ", "2": "Red", "3": "red", "4": 3}}"#,
        )
        .unwrap();

        let expected: LineStatuses = [(3, StatusKey::Red)].into_iter().collect();
        assert_eq!(doc.line_status, expected);
    }

    #[test]
    fn missing_fields_default() {
        let doc = Document::from_json("{}").unwrap();
        assert_eq!(doc, Document::default());

        let doc = Document::from_json(r#"{"text": 42, "styles": []}"#).unwrap();
        assert_eq!(doc.text, "");
        assert!(doc.line_status.is_empty());
    }

    #[test]
    fn rejects_non_objects() {
        assert!(Document::from_json("[]").is_err());
        assert!(Document::from_json("{not json").is_err());
    }

    #[test]
    fn writes_string_keys_and_raw_unicode() {
        let doc = Document::new(
            "买牛奶\n遛狗",
            [(2, StatusKey::Red)].into_iter().collect(),
            Settings::default(),
        );
        let json = doc.to_json().unwrap();

        assert!(json.contains("买牛奶"));
        assert!(json.contains(r#""2": "red""#));
        assert!(json.contains(r#""x": null"#));
    }
}
