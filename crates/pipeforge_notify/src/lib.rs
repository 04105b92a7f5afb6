//! # pipeforge_notify
//!
//! Completion notification for pipeforge.
//!
//! After a project's artifacts are generated, one message carrying the
//! project identifier is published to a well-known queue so the pipeline
//! server can pick up the new configuration.
//!
//! # Publishers
//!
//! - **SQS**: [`SqsPublisher`], enabled by the default `sqs` feature
//! - **Dry-run**: [`DryRunPublisher`] logs instead of sending
//! - **Mock**: [`MockPublisher`] captures messages for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pipeforge_notify::{CompletionNotifier, QueueConfig, SqsPublisher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let publisher = SqsPublisher::connect(&QueueConfig::default()).await?;
//!     let notifier = CompletionNotifier::new(Arc::new(publisher));
//!
//!     if let Err(e) = notifier.notify("checkout-service").await {
//!         eprintln!("notification failed: {e}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod mock;
pub mod notifier;
pub mod publisher;
#[cfg(feature = "sqs")]
pub mod sqs;

pub use config::{QueueConfig, DEFAULT_QUEUE, DEFAULT_REGION};
pub use error::{NotifyError, NotifyResult};
pub use mock::MockPublisher;
pub use notifier::CompletionNotifier;
pub use publisher::{DryRunPublisher, PublishReceipt, QueuePublisher};
#[cfg(feature = "sqs")]
pub use sqs::SqsPublisher;
