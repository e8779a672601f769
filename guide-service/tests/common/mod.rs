use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use guide_service::services::providers::mock::MockProvider;
use guide_service::services::GuideGenerator;
use guide_service::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_MODEL: &str = "gpt-3.5-turbo";

/// Router wired to `mock`; the mock is returned for request inspection.
pub fn router_with(mock: MockProvider) -> (Router, Arc<MockProvider>) {
    let mock = Arc::new(mock);
    let generator = GuideGenerator::new(mock.clone(), TEST_MODEL);
    (build_router(AppState::new(generator)), mock)
}

pub fn knowledge_base() -> Value {
    json!({
        "guidelines": {
            "web": { "bodySize": "16px", "minTouchTarget": "44px" },
            "ios": { "bodySize": "17pt", "font": "SF Pro" }
        },
        "iri_colors": {
            "serene": { "keywords": ["calm", "peaceful"], "base": "#88aacc" },
            "vivid": { "keywords": ["energetic"], "base": "#ff3300" }
        }
    })
}

pub fn guide_body(context: Value) -> String {
    json!({ "context": context, "knowledgeBase": knowledge_base() }).to_string()
}

pub fn banking_context() -> Value {
    json!({
        "platform": "Web",
        "service": "Banking",
        "keyword": "calm",
        "primaryColor": "#112233"
    })
}

pub fn model_guide() -> Value {
    json!({
        "colorSystem": {
            "primary": { "main": "#112233", "light": "#3a4d66", "dark": "#05090f" },
            "secondary": { "main": "#e0a040", "light": "#f2cf99", "dark": "#9c6a1e" }
        },
        "typography": { "bodySize": "16px", "headlineSize": "32px", "lineHeight": "1.5" },
        "accessibility": { "textColorOnPrimary": "#ffffff", "contrastRatio": "15.2:1" }
    })
}

pub async fn send(router: Router, method: &str, uri: &str, body: String) -> Response<Body> {
    router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .expect("router responds")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}
