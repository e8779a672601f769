//! Design-guide generation with a single fallback path.
//!
//! Each step reports its own [`GuideError`] kind; [`GuideGenerator::respond`]
//! turns any of them into the fixed fallback guide so callers always get a
//! renderable result.

use crate::models::loose::{display, is_truthy};
use crate::models::{DesignGuide, GuideRequest};
use crate::services::knowledge::{color_group_for, platform_guideline};
use crate::services::prompt::build_completion_request;
use crate::services::providers::{CompletionProvider, ProviderError};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Why a guide could not be generated.
#[derive(Error, Debug)]
pub enum GuideError {
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(#[source] serde_json::Error),

    #[error("Invalid knowledge base: {0}")]
    InvalidKnowledgeBase(String),

    #[error("Completion failed: {0}")]
    Completion(#[from] ProviderError),

    #[error("Completion is not valid JSON: {0}")]
    MalformedCompletion(#[source] serde_json::Error),

    #[error("Completion does not match the design guide shape: {0}")]
    SchemaMismatch(String),
}

impl GuideError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GuideError::InvalidRequestBody(_) => "invalid_request_body",
            GuideError::InvalidKnowledgeBase(_) => "invalid_knowledge_base",
            GuideError::Completion(_) => "completion",
            GuideError::MalformedCompletion(_) => "malformed_completion",
            GuideError::SchemaMismatch(_) => "schema_mismatch",
        }
    }
}

/// Result of handling one request body.
#[derive(Debug)]
pub enum GuideOutcome {
    /// The model's guide, returned verbatim.
    Generated(Value),

    /// The fixed guide, plus the failure that caused it.
    Fallback { guide: DesignGuide, cause: GuideError },
}

impl GuideOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, GuideOutcome::Fallback { .. })
    }

    pub fn into_body(self) -> Value {
        match self {
            GuideOutcome::Generated(value) => value,
            GuideOutcome::Fallback { guide, .. } => Value::from(&guide),
        }
    }
}

pub struct GuideGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl GuideGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a guide. The parsed JSON is returned as-is once it
    /// passes the shape check.
    pub async fn generate(&self, request: &GuideRequest) -> Result<Value, GuideError> {
        let context = &request.context;
        let kb = &request.knowledge_base;

        let guideline = platform_guideline(kb, &context.platform);
        let color_group = color_group_for(kb, context.keyword.as_ref())
            .map_err(GuideError::InvalidKnowledgeBase)?
            .map(|(name, _)| name);

        tracing::debug!(
            platform = %context.platform,
            has_guideline = guideline.is_some(),
            color_groups = kb.iri_colors.len(),
            color_group = ?color_group,
            "Resolved knowledge base entries"
        );

        let completion_request = build_completion_request(&self.model, context, guideline);
        let text = self.provider.complete(&completion_request).await?;

        let value: Value =
            serde_json::from_str(&text).map_err(GuideError::MalformedCompletion)?;
        DesignGuide::check_shape(&value).map_err(GuideError::SchemaMismatch)?;

        Ok(value)
    }

    /// Handle a raw request body. Never fails: any error yields the fallback
    /// guide, keyed on the caller's primary color when it could be read. A
    /// truthy non-string color is used in its interpolated string form.
    pub async fn respond(&self, body: &str) -> GuideOutcome {
        let raw: Result<Value, _> = serde_json::from_str(body);
        let primary_color = raw
            .as_ref()
            .ok()
            .and_then(|v| v.pointer("/context/primaryColor"))
            .filter(|v| is_truthy(v))
            .map(display);

        let result = match raw.and_then(serde_json::from_value::<GuideRequest>) {
            Ok(request) => self.generate(&request).await,
            Err(e) => Err(GuideError::InvalidRequestBody(e)),
        };

        match result {
            Ok(value) => GuideOutcome::Generated(value),
            Err(cause) => {
                tracing::warn!(
                    error = %cause,
                    kind = cause.kind(),
                    "Design guide generation failed, serving fallback"
                );
                GuideOutcome::Fallback {
                    guide: DesignGuide::fallback(primary_color.as_deref()),
                    cause,
                }
            }
        }
    }

    pub async fn health_check(&self) -> Result<(), ProviderError> {
        self.provider.health_check().await
    }
}
