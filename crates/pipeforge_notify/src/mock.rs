//! Mock queue publisher for testing.
//!
//! Records every message it is asked to send and can be told to fail, so
//! notification paths can be exercised without a live queue.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{NotifyError, NotifyResult};
use crate::publisher::{PublishReceipt, QueuePublisher};

/// Mock publisher that captures messages instead of sending them.
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect the other afterwards.
#[derive(Clone)]
pub struct MockPublisher {
    queue: String,
    /// Bodies of every successfully "sent" message, in order.
    sent: Arc<RwLock<Vec<String>>>,
    /// Number of send attempts, including failed ones.
    attempts: Arc<AtomicUsize>,
    /// Simulated failure to return on every send.
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new("mock-queue")
    }
}

impl MockPublisher {
    /// Create a new mock publisher bound to `queue`.
    pub fn new(queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            sent: Arc::new(RwLock::new(Vec::new())),
            attempts: Arc::new(AtomicUsize::new(0)),
            simulate_failure: Arc::new(RwLock::new(None)),
        }
    }

    /// Make every send fail with `message`.
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    /// Bodies of messages sent so far.
    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.read().clone()
    }

    /// Number of send attempts so far.
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Forget captured messages and attempts.
    pub fn clear(&self) {
        self.sent.write().clear();
        self.attempts.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl QueuePublisher for MockPublisher {
    fn queue_name(&self) -> String {
        self.queue.clone()
    }

    async fn send_message(&self, body: &str) -> NotifyResult<PublishReceipt> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(message) = self.simulate_failure.read().clone() {
            return Err(NotifyError::PublishFailed {
                queue: self.queue.clone(),
                message,
            });
        }

        self.sent.write().push(body.to_string());
        Ok(PublishReceipt::new(&self.queue, body).with_message_id(format!("mock-{}", attempt)))
    }
}
