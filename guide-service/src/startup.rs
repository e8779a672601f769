//! Application startup and lifecycle management.

use crate::config::GuideConfig;
use crate::handlers::{
    guide::generate_guide,
    health::{health_check, readiness_check},
};
use crate::services::providers::mock::MockProvider;
use crate::services::providers::openai::{OpenAiConfig, OpenAiProvider};
use crate::services::providers::{CompletionProvider, ProviderKind};
use crate::services::GuideGenerator;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Path of the guide endpoint.
pub const GUIDE_PATH: &str = "/generate-guide";

/// Same endpoint under the serverless-functions prefix existing clients call.
pub const FUNCTION_GUIDE_PATH: &str = "/.netlify/functions/generate-guide";

/// Largest guide request body accepted, matching the serverless payload cap.
/// Knowledge bases are sent inline with every request.
pub const MAX_GUIDE_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<GuideGenerator>,
}

impl AppState {
    pub fn new(generator: GuideGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route(
            GUIDE_PATH,
            any(generate_guide).layer(DefaultBodyLimit::max(MAX_GUIDE_BODY_BYTES)),
        )
        .route(
            FUNCTION_GUIDE_PATH,
            any(generate_guide).layer(DefaultBodyLimit::max(MAX_GUIDE_BODY_BYTES)),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Construct the configured completion provider.
pub fn build_provider(config: &GuideConfig) -> Result<Arc<dyn CompletionProvider>, AppError> {
    match config.provider {
        ProviderKind::OpenAi => {
            let provider = OpenAiProvider::new(OpenAiConfig {
                api_key: config.openai.api_key.clone(),
                base_url: config.openai.base_url.clone(),
                timeout: Duration::from_secs(config.openai.timeout_secs),
            })
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
            Ok(Arc::new(provider))
        }
        ProviderKind::Mock => {
            tracing::warn!("Using mock completion provider; responses are canned");
            Ok(Arc::new(MockProvider::sample()))
        }
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the configured provider.
    pub async fn build(config: GuideConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: GuideConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let generator = GuideGenerator::new(provider, config.openai.model.clone());
        tracing::info!(
            provider = ?config.provider,
            model = %generator.model(),
            "Initialized guide generator"
        );

        // Port 0 binds a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Guide service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(generator),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
