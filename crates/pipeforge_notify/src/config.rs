//! Queue configuration.

use serde::{Deserialize, Serialize};

/// Queue that receives completion notifications by default.
pub const DEFAULT_QUEUE: &str = "gocd-update";

/// Region the default queue lives in.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where completion notifications are published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Well-known queue name, resolved to a URL at connect time
    pub queue: String,
    /// Cloud region hosting the queue
    pub region: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            queue: DEFAULT_QUEUE.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl QueueConfig {
    pub fn new(queue: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            region: region.into(),
        }
    }

    pub fn queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = queue.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}
