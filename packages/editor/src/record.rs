//! # Template Records & Compiler Wire Types
//!
//! A [`TemplateRecord`] is what gets persisted or copied to the clipboard:
//! the markup exactly as serialized, next to the tree it came from.
//!
//! HTML compilation happens in an external service. Only its request and
//! response shapes live here; the transport belongs to the embedding
//! application.

use crate::EditorError;
use chrono::{DateTime, Utc};
use mailclip_compiler_mjml::{serialize_with_options, SerializeOptions};
use mailclip_document::Node;
use serde::{Deserialize, Serialize};

/// Stored template: name, markup text, tree snapshot and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub name: String,
    pub markup: String,
    pub tree: Vec<Node>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TemplateRecord {
    pub fn new(name: impl Into<String>, tree: Vec<Node>, options: &SerializeOptions) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            markup: serialize_with_options(&tree, options),
            tree,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the tree, re-serialize and bump `updated_at`
    pub fn update(&mut self, tree: Vec<Node>, options: &SerializeOptions) {
        self.markup = serialize_with_options(&tree, options);
        self.tree = tree;
        self.updated_at = Utc::now();
    }
}

/// Request body for the HTML compiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileWarning {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Successful compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledHtml {
    pub html: String,
    #[serde(default)]
    pub warnings: Vec<CompileWarning>,
}

/// Response body from the HTML compiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompileResponse {
    Success(CompiledHtml),
    Failure { error: String },
}

impl CompileResponse {
    /// Surface a compiler failure as an [`EditorError::Compiler`]
    pub fn into_result(self) -> Result<CompiledHtml, EditorError> {
        match self {
            CompileResponse::Success(compiled) => Ok(compiled),
            CompileResponse::Failure { error } => Err(EditorError::Compiler(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailclip_document::ComponentType;

    #[test]
    fn test_record_json_shape() {
        let record = TemplateRecord::new(
            "Welcome",
            vec![Node::new("s", ComponentType::Section).with_children(vec![])],
            &SerializeOptions::default(),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "Welcome");
        assert!(value["markup"].as_str().unwrap().starts_with("<mjml>"));
        assert_eq!(value["tree"][0]["type"], "mj-section");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn test_record_update_refreshes_markup() {
        let options = SerializeOptions::default();
        let mut record = TemplateRecord::new("Welcome", vec![], &options);
        let created = record.created_at;

        record.update(
            vec![Node::new("t", ComponentType::Text).with_content("Hi there")],
            &options,
        );

        assert!(record.markup.contains("Hi there"));
        assert_eq!(record.created_at, created);
        assert!(record.updated_at >= created);
    }

    #[test]
    fn test_compile_success_response() {
        let json = r#"{"html": "<html></html>", "warnings": [{"message": "unknown attribute", "tagName": "mj-text", "line": 4}]}"#;
        let response: CompileResponse = serde_json::from_str(json).unwrap();

        let compiled = response.into_result().unwrap();
        assert_eq!(compiled.html, "<html></html>");
        assert_eq!(compiled.warnings[0].tag_name.as_deref(), Some("mj-text"));
        assert_eq!(compiled.warnings[0].line, Some(4));
    }

    #[test]
    fn test_compile_failure_response() {
        let response: CompileResponse = serde_json::from_str(r#"{"error": "Malformed MJML"}"#).unwrap();

        let err = response.into_result().unwrap_err();
        assert!(matches!(err, EditorError::Compiler(ref msg) if msg == "Malformed MJML"));
    }

    #[test]
    fn test_compile_request_json() {
        let request = CompileRequest {
            markup: "<mjml></mjml>".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"markup":"<mjml></mjml>"}"#
        );
    }
}
