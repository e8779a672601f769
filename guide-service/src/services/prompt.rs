//! Prompt construction for design-guide completions.

use crate::models::loose::display;
use crate::models::RequestContext;
use crate::services::providers::{ChatMessage, CompletionRequest};
use serde_json::Value;

/// User turn that triggers generation.
pub const USER_TRIGGER: &str = "Generate the design guide.";

pub const TEMPERATURE: f64 = 0.7;

pub const MAX_TOKENS: u32 = 500;

/// Rendered in place of context fields the caller left out.
const UNSPECIFIED: &str = "unspecified";

/// Render the system prompt for `context`, embedding the platform guideline
/// as compact JSON (`null` when no guideline applies).
pub fn build_system_prompt(context: &RequestContext, guideline: Option<&Value>) -> String {
    let field = |value: &Option<Value>| {
        value
            .as_ref()
            .map_or_else(|| UNSPECIFIED.to_string(), display)
    };
    let guideline = guideline.map_or_else(|| "null".to_string(), Value::to_string);

    format!(
        "You are a UI/UX design expert. Generate a color palette and typography guide based on the provided context.
Platform: {platform}
Service: {service}
Mood: {mood}
Primary Color: {primary}

Use the following guidelines: {guideline}

Return a JSON object with:
- colorSystem: primary (main, light, dark) and secondary (main, light, dark)
- typography: bodySize, headlineSize, lineHeight
- accessibility: textColorOnPrimary, contrastRatio",
        platform = context.platform,
        service = field(&context.service),
        mood = field(&context.keyword),
        primary = field(&context.primary_color),
        guideline = guideline,
    )
}

/// The full completion call: system prompt, fixed user trigger, and the
/// fixed sampling settings.
pub fn build_completion_request(
    model: &str,
    context: &RequestContext,
    guideline: Option<&Value>,
) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(build_system_prompt(context, guideline)),
            ChatMessage::user(USER_TRIGGER),
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}
