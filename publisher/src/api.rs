//! Blocking HTTP client for the assignments API.

use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::time::Duration;

/// Assignment record as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub content: String,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Response envelope shared by all endpoints.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Assignment>,
    #[serde(default)]
    message: Option<String>,
}

impl Envelope {
    fn failure_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "request failed".to_string())
    }
}

pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn assignment_url(&self, date: &str) -> String {
        format!("{}/assignments/{}", self.base_url, date)
    }

    /// Fetch the assignment for a date; `None` when nothing is published.
    pub fn get_assignment(&self, date: &str) -> anyhow::Result<Option<Assignment>> {
        let envelope: Envelope = self
            .http
            .get(self.assignment_url(date))
            .send()
            .context("request failed")?
            .json()
            .context("malformed response")?;

        if !envelope.success {
            return Err(anyhow!(envelope.failure_message()));
        }
        Ok(envelope.data)
    }

    /// Publish content for a date. Returns the saved record plus the server's
    /// created/updated message.
    pub fn put_assignment(
        &self,
        date: &str,
        content: &str,
    ) -> anyhow::Result<(Assignment, String)> {
        let envelope: Envelope = self
            .http
            .put(self.assignment_url(date))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .context("request failed")?
            .json()
            .context("malformed response")?;

        if !envelope.success {
            return Err(anyhow!(envelope.failure_message()));
        }
        let record = envelope
            .data
            .ok_or_else(|| anyhow!("response missing saved assignment"))?;
        let message = envelope
            .message
            .unwrap_or_else(|| "Assignment saved".to_string());
        Ok((record, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_null_data() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"success":true,"data":null,"message":"No assignment for this date"}"#,
        )
        .unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_envelope_decodes_record() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"success":true,"data":{"content":"Math p.1-2","date":"2025-06-01","createdAt":"2025-06-01T08:00:00Z","updatedAt":"2025-06-01T08:00:00Z"}}"#,
        )
        .unwrap();
        let record = envelope.data.unwrap();
        assert_eq!(record.date, "2025-06-01");
        assert_eq!(record.content, "Math p.1-2");
    }

    #[test]
    fn test_assignment_url_strips_trailing_slash() {
        let api = ApiClient::new("http://example.com/api/").unwrap();
        assert_eq!(
            api.assignment_url("2025-06-01"),
            "http://example.com/api/assignments/2025-06-01"
        );
    }
}
