//! Message formats accepted by the Stride message API.
//!
//! The format selects both the request Content-Type and the body shape:
//! text and markdown send the message as-is, adf wraps it in a document envelope.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire format of an outbound message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    /// Plain text, sent raw with Content-Type text/plain.
    Text,
    /// Markdown, sent raw with Content-Type text/markdown.
    Markdown,
    /// Atlassian Document Format: message wrapped in a single-paragraph document, sent as JSON.
    #[default]
    Adf,
}

impl MessageFormat {
    /// Content-Type header value for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            MessageFormat::Text => "text/plain",
            MessageFormat::Markdown => "text/markdown",
            MessageFormat::Adf => "application/json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageFormat::Text => "text",
            MessageFormat::Markdown => "markdown",
            MessageFormat::Adf => "adf",
        }
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MessageFormat::Text),
            "markdown" => Ok(MessageFormat::Markdown),
            "adf" => Ok(MessageFormat::Adf),
            other => Err(format!(
                "unknown message format '{}' (expected text, markdown, or adf)",
                other
            )),
        }
    }
}
