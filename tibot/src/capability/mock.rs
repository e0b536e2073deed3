//! Scripted capability for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::message::Message;

use super::{CapabilityRequest, CapabilityResponse, ChatCapability};

/// One scripted capability outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Append `produced` to the request messages and return `structured`.
    Answer {
        produced: Vec<Message>,
        structured: Option<Value>,
    },
    /// Fail with `AgentError::CapabilityFailed`.
    Fail(String),
}

impl MockReply {
    /// A single AI message with `content` and no structured response.
    pub fn text(content: impl Into<String>) -> Self {
        Self::messages(vec![Message::ai(content)])
    }

    pub fn messages(produced: Vec<Message>) -> Self {
        Self::Answer {
            produced,
            structured: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }

    /// Attaches a structured response (builder). No effect on `Fail`.
    pub fn with_structured(self, value: Value) -> Self {
        match self {
            Self::Answer { produced, .. } => Self::Answer {
                produced,
                structured: Some(value),
            },
            fail => fail,
        }
    }
}

/// Capability that replays a script of [`MockReply`]s and records every request.
///
/// Replies are consumed in order; once the script is exhausted the last reply repeats.
/// An empty script echoes the request messages back with nothing produced.
#[derive(Debug, Default)]
pub struct MockCapability {
    replies: Vec<MockReply>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CapabilityRequest>>,
}

impl MockCapability {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with one AI message.
    pub fn answering(content: impl Into<String>) -> Self {
        Self::new(vec![MockReply::text(content)])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CapabilityRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ChatCapability for MockCapability {
    async fn invoke(&self, request: CapabilityRequest) -> Result<CapabilityResponse, AgentError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .get(n)
            .or_else(|| self.replies.last())
            .cloned();
        let mut messages = request.messages.clone();
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        match reply {
            None => Ok(CapabilityResponse {
                messages,
                structured_response: None,
            }),
            Some(MockReply::Fail(message)) => Err(AgentError::CapabilityFailed(message)),
            Some(MockReply::Answer {
                produced,
                structured,
            }) => {
                messages.extend(produced);
                Ok(CapabilityResponse {
                    messages,
                    structured_response: structured,
                })
            }
        }
    }
}
