//! Completion notifier.

use std::sync::Arc;

use tracing::{error, info};

use crate::error::{NotifyError, NotifyResult};
use crate::publisher::{PublishReceipt, QueuePublisher};

/// Announces that artifacts for a project have been generated.
///
/// Publishing is best-effort. Failures are logged here and handed back to
/// the caller as an `Err`, but they never panic and never retry.
#[derive(Clone)]
pub struct CompletionNotifier {
    publisher: Arc<dyn QueuePublisher>,
}

impl CompletionNotifier {
    pub fn new(publisher: Arc<dyn QueuePublisher>) -> Self {
        Self { publisher }
    }

    /// Queue the notifier publishes to.
    pub fn queue_name(&self) -> String {
        self.publisher.queue_name()
    }

    /// Publish one message whose body is `project_identifier`.
    pub async fn notify(&self, project_identifier: &str) -> NotifyResult<PublishReceipt> {
        let queue = self.publisher.queue_name();

        if project_identifier.trim().is_empty() {
            error!(queue = %queue, "Refusing to publish an empty project identifier");
            return Err(NotifyError::EmptyMessage);
        }

        match self.publisher.send_message(project_identifier).await {
            Ok(receipt) => {
                info!(
                    queue = %queue,
                    message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    "Published completion notice for {}",
                    project_identifier
                );
                Ok(receipt)
            }
            Err(e) => {
                error!(queue = %queue, error = %e, "Unable to send completion notice for {}", project_identifier);
                Err(e)
            }
        }
    }
}
