//! The guide endpoint, in serverless-function form plus its HTTP adapter.

use crate::services::GuideGenerator;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

/// An invocation as delivered by a serverless function runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// A function runtime response: status, headers, and a JSON string body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Handle one invocation. Only `POST` is accepted; every `POST` gets a 200
/// with a design guide, generated or fallback.
pub async fn handle_event(generator: &GuideGenerator, event: &FunctionEvent) -> FunctionResponse {
    if event.http_method != Method::POST.as_str() {
        return FunctionResponse {
            status_code: StatusCode::METHOD_NOT_ALLOWED.as_u16(),
            headers: BTreeMap::new(),
            body: json!({ "message": "Method Not Allowed" }).to_string(),
        };
    }

    let outcome = generator
        .respond(event.body.as_deref().unwrap_or_default())
        .await;

    FunctionResponse {
        status_code: StatusCode::OK.as_u16(),
        headers: BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]),
        body: outcome.into_body().to_string(),
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        // Replaces the text/plain default that a String body gets.
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                response.headers_mut().insert(name, value);
            }
        }

        response
    }
}

/// HTTP adapter: any method, raw body.
pub async fn generate_guide(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    let event = FunctionEvent {
        http_method: method.as_str().to_string(),
        body: Some(String::from_utf8_lossy(&body).into_owned()),
    };

    handle_event(&state.generator, &event).await.into_response()
}
