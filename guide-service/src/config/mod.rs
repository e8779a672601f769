use crate::services::providers::ProviderKind;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Model used when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct GuideConfig {
    pub common: core_config::Config,
    pub provider: ProviderKind,
    pub openai: OpenAiSettings,
}

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// Empty when running against the mock provider.
    pub api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GuideConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let provider: ProviderKind = get_env("GUIDE_PROVIDER", Some("openai"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let api_key = match provider {
            ProviderKind::OpenAi => get_env("OPENAI_API_KEY", None, is_prod)?,
            ProviderKind::Mock => env::var("OPENAI_API_KEY").unwrap_or_default(),
        };

        let timeout_raw = get_env(
            "OPENAI_TIMEOUT_SECS",
            Some(&DEFAULT_TIMEOUT_SECS.to_string()),
            is_prod,
        )?;
        let timeout_secs = timeout_raw.parse().map_err(|_| {
            AppError::ConfigError(anyhow::anyhow!(
                "OPENAI_TIMEOUT_SECS must be a whole number of seconds, got {}",
                timeout_raw
            ))
        })?;

        Ok(GuideConfig {
            common: common_config,
            provider,
            openai: OpenAiSettings {
                api_key: Secret::new(api_key),
                model: get_env("OPENAI_MODEL", Some(DEFAULT_MODEL), is_prod)?,
                base_url: get_env(
                    "OPENAI_BASE_URL",
                    Some(crate::services::providers::openai::OPENAI_API_BASE),
                    is_prod,
                )?,
                timeout_secs,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
