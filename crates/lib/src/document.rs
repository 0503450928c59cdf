//! Minimal Atlassian Document Format (ADF) envelope.
//!
//! The message API accepts a rich-text document; we only ever build the smallest
//! valid shape: one paragraph node containing one text node.

use serde::{Deserialize, Serialize};

/// Top-level ADF document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    #[serde(rename = "type")]
    pub typ: String,
    pub content: Vec<Node>,
}

/// A content node (paragraph or text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Document {
    /// Wrap plain text in a single-paragraph document.
    pub fn paragraph(text: &str) -> Self {
        Self {
            version: 1,
            typ: "doc".to_string(),
            content: vec![Node {
                typ: "paragraph".to_string(),
                content: vec![Node {
                    typ: "text".to_string(),
                    content: Vec::new(),
                    text: Some(text.to_string()),
                }],
                text: None,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_envelope_shape() {
        let doc = Document::paragraph("hello");
        let json = serde_json::to_value(&doc).expect("serialize document");
        assert_eq!(json["version"], 1);
        assert_eq!(json["type"], "doc");
        let content = json["content"].as_array().expect("content array");
        assert_eq!(content.len(), 1);
        assert_eq!(content[0]["type"], "paragraph");
        let inner = content[0]["content"].as_array().expect("paragraph content");
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0]["type"], "text");
        assert_eq!(inner[0]["text"], "hello");
    }

    #[test]
    fn text_node_omits_empty_fields() {
        let doc = Document::paragraph("hi");
        let json = serde_json::to_value(&doc).expect("serialize document");
        let text_node = &json["content"][0]["content"][0];
        assert!(text_node.get("content").is_none());
    }
}
