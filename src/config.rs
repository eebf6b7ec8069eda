use clap::{Parser, ValueEnum};

use crate::constants::{DEFAULT_PREFERRED_MODELS, ERROR_MISSING_CREDENTIAL, GEMINI_DEFAULT_BASE_URL};
use crate::error::RelayError;

#[derive(Parser, Debug, Clone)]
#[command(name = "gemini-chat-relay")]
#[command(about = "small web backend relaying browser chat messages to the gemini api")]
pub struct Config {
    #[arg(
        long,
        env = "RELAY_LISTEN",
        default_value = "127.0.0.1:5000",
        help = "server listen address"
    )]
    pub listen: String,

    #[arg(
        long,
        env = "GEMINI_API_KEY",
        hide_env_values = true,
        help = "gemini api key"
    )]
    pub api_key: Option<String>,

    #[arg(
        long,
        env = "GEMINI_API_BASE_URL",
        default_value = GEMINI_DEFAULT_BASE_URL,
        help = "gemini api base url"
    )]
    pub api_base_url: String,

    #[arg(
        long,
        env = "GEMINI_MODEL",
        help = "model to use in static mode, e.g. gemini-2.0-flash"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_enum,
        default_value_t = ModelSelectionMode::Startup,
        help = "how the model is chosen"
    )]
    pub model_selection: ModelSelectionMode,

    #[arg(
        long,
        env = "GEMINI_PREFERRED_MODELS",
        value_delimiter = ',',
        default_values_t = default_preferred_models(),
        help = "preferred model names, most preferred first"
    )]
    pub preferred_models: Vec<String>,

    #[arg(
        long,
        help = "fall back to any generateContent model when no preference matches"
    )]
    pub capability_fallback: bool,

    #[arg(
        long,
        default_value = "3600",
        help = "ttl for the selected model in seconds (startup mode)"
    )]
    pub model_cache_ttl_seconds: u64,

    #[arg(
        long,
        default_value = "60",
        help = "timeout for calls to the gemini api in seconds"
    )]
    pub request_timeout_seconds: u64,

    #[arg(
        long,
        env = "RELAY_LOG_LEVEL",
        default_value = "info",
        help = "log level (off, error, warn, info, debug, trace)"
    )]
    pub log_level: String,

    #[arg(long, help = "print the models available to the api key and exit")]
    pub list_models: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSelectionMode {
    /// Use --model as given
    Static,
    /// Select once at startup and keep the result until it expires or is refreshed
    Startup,
    /// List and select on every chat request
    PerRequest,
}

impl Config {
    /// API key, trimmed. Only `None` before validation has run.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Preferred model names with blanks and namespace prefixes removed.
    pub fn preference_list(&self) -> Vec<String> {
        self.preferred_models
            .iter()
            .map(|name| crate::model::bare_model_name(name.trim()).to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

fn default_preferred_models() -> Vec<String> {
    DEFAULT_PREFERRED_MODELS
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub fn validate_config(config: &Config) -> Result<(), RelayError> {
    if config.api_key().is_none() {
        return Err(RelayError::missing_credential(ERROR_MISSING_CREDENTIAL));
    }
    if config.listen.parse::<std::net::SocketAddr>().is_err() {
        return Err(RelayError::bad_request(&format!(
            "invalid listen address: {}",
            config.listen
        )));
    }
    if !config.api_base_url.starts_with("http://") && !config.api_base_url.starts_with("https://")
    {
        return Err(RelayError::bad_request(&format!(
            "invalid Gemini API URL (must start with http:// or https://): {}",
            config.api_base_url
        )));
    }
    if let Err(e) = url::Url::parse(&config.api_base_url) {
        return Err(RelayError::bad_request(&format!(
            "invalid Gemini API URL format: {}",
            e
        )));
    }
    if config.preference_list().is_empty() && !config.capability_fallback {
        return Err(RelayError::bad_request(
            "preferred model list is empty and capability fallback is disabled",
        ));
    }
    if config.model_selection == ModelSelectionMode::Static
        && config.model.as_deref().is_none_or(|m| m.trim().is_empty())
    {
        return Err(RelayError::bad_request(
            "--model is required when --model-selection=static",
        ));
    }
    if config.request_timeout_seconds == 0 {
        return Err(RelayError::bad_request(
            "request timeout must be at least one second",
        ));
    }
    Ok(())
}
