//! Queue publisher trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::NotifyResult;

/// Acknowledgement of a published message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Queue the message went to
    pub queue: String,
    /// Broker-assigned message id, when the broker returns one
    pub message_id: Option<String>,
    /// Message body as sent
    pub body: String,
}

impl PublishReceipt {
    pub fn new(queue: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            message_id: None,
            body: body.into(),
        }
    }

    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }
}

/// Something that can deliver a text message to one named queue.
#[async_trait]
pub trait QueuePublisher: Send + Sync {
    /// Queue this publisher is bound to.
    fn queue_name(&self) -> String;

    /// Send one message and wait for the broker's acknowledgement.
    async fn send_message(&self, body: &str) -> NotifyResult<PublishReceipt>;
}

/// Publisher that logs instead of sending.
#[derive(Debug, Clone)]
pub struct DryRunPublisher {
    queue: String,
}

impl DryRunPublisher {
    pub fn new(queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
        }
    }
}

#[async_trait]
impl QueuePublisher for DryRunPublisher {
    fn queue_name(&self) -> String {
        self.queue.clone()
    }

    async fn send_message(&self, body: &str) -> NotifyResult<PublishReceipt> {
        info!(queue = %self.queue, body = %body, "[dry-run] Would publish message");
        Ok(PublishReceipt::new(&self.queue, body))
    }
}
