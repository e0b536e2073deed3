//! Wall-clock bound for a capability call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AgentError;

use super::{CapabilityRequest, CapabilityResponse, ChatCapability};

/// Wraps a capability with `tokio::time::timeout`.
///
/// An elapsed deadline drops the inner call and fails with
/// `AgentError::CapabilityTimeout`; nothing it produced is kept.
#[derive(Clone)]
pub struct TimeoutCapability {
    inner: Arc<dyn ChatCapability>,
    timeout: Duration,
}

impl TimeoutCapability {
    pub fn new(inner: Arc<dyn ChatCapability>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ChatCapability for TimeoutCapability {
    async fn invoke(&self, request: CapabilityRequest) -> Result<CapabilityResponse, AgentError> {
        match tokio::time::timeout(self.timeout, self.inner.invoke(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "capability call timed out");
                Err(AgentError::CapabilityTimeout(self.timeout))
            }
        }
    }
}
