//! ntfy relay -- publish plain-text messages to a topic over HTTP.
//!
//! `POST <server>/<topic>` with the message as the body. Title, tags and
//! priority travel as headers; protected topics take a bearer token.

use reqwest::Client;
use url::Url;

use crate::error::NotifyError;
use crate::notify::message::NotificationMessage;
use crate::notify::traits::{PublishReceipt, Publisher};
use crate::storage::NotifyConfig;

/// Longest topic name ntfy accepts.
pub const MAX_TOPIC_LEN: usize = 64;

/// ntfy topics are 1-64 characters of `[-_A-Za-z0-9]`.
pub fn is_valid_topic(topic: &str) -> bool {
    !topic.is_empty()
        && topic.len() <= MAX_TOPIC_LEN
        && topic
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

pub struct NtfyPublisher {
    server: Url,
    token: Option<String>,
    http_client: Client,
}

impl NtfyPublisher {
    /// Create a publisher for `server` (e.g. `https://ntfy.sh`).
    pub fn new(server: &str, token: Option<String>) -> Result<Self, NotifyError> {
        let mut base = server.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let server = Url::parse(&base).map_err(|e| NotifyError::InvalidUrl {
            url: server.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            server,
            token: token.filter(|t| !t.is_empty()),
            http_client: Client::new(),
        })
    }

    pub fn from_config(config: &NotifyConfig) -> Result<Self, NotifyError> {
        Self::new(&config.server, config.token.clone())
    }

    /// Full publish URL for `topic`.
    pub fn publish_url(&self, topic: &str) -> Result<Url, NotifyError> {
        if !is_valid_topic(topic) {
            return Err(NotifyError::InvalidUrl {
                url: format!("{}{topic}", self.server),
                message: format!(
                    "topic must be 1-{MAX_TOPIC_LEN} characters of letters, digits, '-' or '_'"
                ),
            });
        }
        self.server
            .join(topic)
            .map_err(|e| NotifyError::InvalidUrl {
                url: format!("{}{topic}", self.server),
                message: e.to_string(),
            })
    }
}

impl Publisher for NtfyPublisher {
    fn name(&self) -> &str {
        "ntfy"
    }

    async fn publish(&self, message: &NotificationMessage) -> Result<PublishReceipt, NotifyError> {
        let url = self.publish_url(&message.topic)?;
        tracing::debug!(%url, title = %message.title, "publishing to ntfy");

        let mut request = self
            .http_client
            .post(url.clone())
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(message.body.clone());
        if !message.title.is_empty() {
            request = request.header("Title", message.title.as_str());
        }
        if !message.tags.is_empty() {
            request = request.header("Tags", message.tags.join(","));
        }
        if let Some(priority) = message.priority {
            request = request.header("Priority", priority.to_string());
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|source| NotifyError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let message_id = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(str::to_string));

        Ok(PublishReceipt {
            status: status.as_u16(),
            message_id,
        })
    }
}
