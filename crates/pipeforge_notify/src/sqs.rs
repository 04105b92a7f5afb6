//! AWS SQS publisher.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::Client;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::QueueConfig;
use crate::error::{NotifyError, NotifyResult};
use crate::publisher::{PublishReceipt, QueuePublisher};

/// A client bound to a resolved queue URL.
struct Connection {
    client: Client,
    queue_url: String,
}

/// Publishes to an SQS queue looked up by name.
///
/// The queue is resolved on first use, so building a publisher never touches
/// the network. Credentials come from the standard AWS provider chain
/// (environment, profile, instance metadata).
pub struct SqsPublisher {
    config: QueueConfig,
    connection: OnceCell<Connection>,
}

impl std::fmt::Debug for SqsPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqsPublisher")
            .field("queue", &self.config.queue)
            .field("region", &self.config.region)
            .field("connected", &self.connection.initialized())
            .finish()
    }
}

impl SqsPublisher {
    /// Create a publisher that connects lazily.
    pub fn new(config: QueueConfig) -> Self {
        Self {
            config,
            connection: OnceCell::new(),
        }
    }

    /// Create a publisher and resolve the queue URL right away.
    pub async fn connect(config: &QueueConfig) -> NotifyResult<Self> {
        let publisher = Self::new(config.clone());
        publisher.connection().await?;
        Ok(publisher)
    }

    /// Resolved queue URL, if connected.
    pub fn queue_url(&self) -> Option<&str> {
        self.connection.get().map(|c| c.queue_url.as_str())
    }

    async fn connection(&self) -> NotifyResult<&Connection> {
        self.connection
            .get_or_try_init(|| async {
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.config.region.clone()))
                    .load()
                    .await;
                let client = Client::new(&sdk_config);
                let queue_url = resolve_queue_url(&client, &self.config.queue).await?;
                Ok::<_, NotifyError>(Connection { client, queue_url })
            })
            .await
    }
}

async fn resolve_queue_url(client: &Client, queue: &str) -> NotifyResult<String> {
    debug!("Resolving SQS queue URL for {}", queue);

    let output = client
        .get_queue_url()
        .queue_name(queue)
        .send()
        .await
        .map_err(|e| NotifyError::ConnectionFailed {
            queue: queue.to_string(),
            message: DisplayErrorContext(&e).to_string(),
        })?;

    let queue_url = output
        .queue_url()
        .ok_or_else(|| NotifyError::QueueNotFound(queue.to_string()))?
        .to_string();

    info!("Resolved SQS queue {} to {}", queue, queue_url);
    Ok(queue_url)
}

#[async_trait]
impl QueuePublisher for SqsPublisher {
    fn queue_name(&self) -> String {
        self.config.queue.clone()
    }

    async fn send_message(&self, body: &str) -> NotifyResult<PublishReceipt> {
        let connection = self.connection().await?;

        let output = connection
            .client
            .send_message()
            .queue_url(&connection.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| NotifyError::PublishFailed {
                queue: self.config.queue.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let mut receipt = PublishReceipt::new(&self.config.queue, body);
        if let Some(id) = output.message_id() {
            receipt = receipt.with_message_id(id);
        }
        Ok(receipt)
    }
}
