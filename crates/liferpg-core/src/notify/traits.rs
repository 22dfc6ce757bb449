use crate::error::NotifyError;
use crate::notify::message::NotificationMessage;

/// What the relay told us about an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub status: u16,
    /// Relay-assigned message id, when the response carried one.
    pub message_id: Option<String>,
}

/// Every notification sink implements this trait.
///
/// A publish is a single attempt. Callers decide whether to try again.
#[allow(async_fn_in_trait)]
pub trait Publisher {
    /// Short identifier for logs (e.g. "ntfy").
    fn name(&self) -> &str;

    /// Deliver one message.
    async fn publish(&self, message: &NotificationMessage) -> Result<PublishReceipt, NotifyError>;
}

/// Result of the daily send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Sent(PublishReceipt),
    /// Nothing to say; no request was made.
    SkippedEmpty,
}

/// Publish `message` unless its body is empty.
///
/// Failures are logged and returned; there is no automatic retry.
pub async fn publish_daily<P: Publisher>(
    publisher: &P,
    message: &NotificationMessage,
) -> Result<PublishOutcome, NotifyError> {
    if message.is_empty() {
        tracing::warn!(topic = %message.topic, "summary is empty, skipping publish");
        return Ok(PublishOutcome::SkippedEmpty);
    }

    match publisher.publish(message).await {
        Ok(receipt) => {
            tracing::info!(
                publisher = publisher.name(),
                topic = %message.topic,
                status = receipt.status,
                "daily summary published"
            );
            Ok(PublishOutcome::Sent(receipt))
        }
        Err(e) => {
            tracing::warn!(publisher = publisher.name(), topic = %message.topic, error = %e, "publish failed");
            Err(e)
        }
    }
}
