//! Daily summary notifications.

pub mod message;
pub mod ntfy;
pub mod traits;

pub use message::{summary_body, NotificationMessage};
pub use ntfy::NtfyPublisher;
pub use traits::{publish_daily, PublishOutcome, PublishReceipt, Publisher};
