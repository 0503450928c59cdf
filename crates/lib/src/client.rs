//! Stride message API client (https://api.atlassian.com by default).
//! Sends one message per call to a site/conversation via HTTP POST.

use crate::document::Document;
use crate::message::MessageFormat;

const DEFAULT_BASE_URL: &str = "https://api.atlassian.com/";

/// Client for the Stride conversation message API.
#[derive(Clone)]
pub struct StrideClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum StrideError {
    #[error("stride request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to send message, return status={0}")]
    Api(u16),
    #[error("serializing message body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Build the request body for a format: adf wraps the text in a document
/// envelope, text and markdown send it unmodified.
pub fn message_body(format: MessageFormat, msg: &str) -> Result<String, StrideError> {
    match format {
        MessageFormat::Adf => Ok(serde_json::to_string(&Document::paragraph(msg))?),
        MessageFormat::Text | MessageFormat::Markdown => Ok(msg.to_string()),
    }
}

impl StrideClient {
    /// Create a client with a bearer token. `base_url` overrides the public API
    /// endpoint (for self-hosted deployments); `validate_certs: false` disables
    /// TLS certificate validation.
    pub fn new(
        token: String,
        base_url: Option<String>,
        validate_certs: bool,
    ) -> Result<Self, StrideError> {
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.trim_end_matches('/').to_string());
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!validate_certs)
            .build()?;
        Ok(Self {
            base_url,
            token,
            client,
        })
    }

    /// URL of the message endpoint for a site/conversation pair.
    pub fn message_url(&self, site_id: &str, conversation_id: &str) -> String {
        format!(
            "{}/site/{}/conversation/{}/message",
            self.base_url, site_id, conversation_id
        )
    }

    /// POST one message to a conversation. Returns the raw response body on
    /// 200/201; any other status is an error carrying the status code.
    pub async fn send_message(
        &self,
        site_id: &str,
        conversation_id: &str,
        msg: &str,
        format: MessageFormat,
    ) -> Result<String, StrideError> {
        let url = self.message_url(site_id, conversation_id);
        let body = message_body(format, msg)?;
        log::debug!("POST {} ({})", url, format);
        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", format.content_type())
            .body(body)
            .send()
            .await?;
        let status = res.status().as_u16();
        if status == 200 || status == 201 {
            Ok(res.text().await?)
        } else {
            Err(StrideError::Api(status))
        }
    }
}
