//! Scripted completion provider for tests and offline runs.

use super::{CompletionProvider, CompletionRequest, ProviderError};
use crate::models::DesignGuide;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Error(ProviderError),
}

/// Mock provider that returns a fixed reply and records every request.
pub struct MockProvider {
    reply: MockReply,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply with the given completion text.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    /// Fail every call with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::new(MockReply::Error(error))
    }

    /// Reply with a well-formed design guide, for running the service
    /// without an API key.
    pub fn sample() -> Self {
        let mut guide = DesignGuide::fallback(Some("#3366ff"));
        guide.color_system.primary.light = "#7094ff".to_string();
        guide.color_system.primary.dark = "#1f3d99".to_string();
        guide.accessibility.contrast_ratio = "4.9:1".to_string();
        Self::replying(Value::from(&guide).to_string())
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Error(err) => Err(err.clone()),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
