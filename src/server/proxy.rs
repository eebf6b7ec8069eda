use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use warp::Filter;

use crate::backend::{GeminiClient, GenerativeBackend};
use crate::config::{Config, ModelSelectionMode};
use crate::error::RelayError;
use crate::logging::LogConfig;
use crate::model::{ModelSelector, ModelSlot};
use crate::server::create_app;

pub struct RelayServer {
    pub config: Config,
    pub backend: Arc<dyn GenerativeBackend>,
    pub model_slot: ModelSlot,
}

impl RelayServer {
    pub fn new(config: Config) -> Result<Self, RelayError> {
        let api_key = config.api_key().unwrap_or_default().to_string();
        let backend = GeminiClient::new(
            &config.api_base_url,
            &api_key,
            Duration::from_secs(config.request_timeout_seconds),
        )?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    pub fn with_backend(config: Config, backend: Arc<dyn GenerativeBackend>) -> Self {
        let selector = ModelSelector::new(config.preference_list(), config.capability_fallback);
        let model_slot = ModelSlot::new(
            config.model_selection,
            config.model.as_deref(),
            selector,
            Duration::from_secs(config.model_cache_ttl_seconds),
        );

        Self {
            config,
            backend,
            model_slot,
        }
    }

    /// Fills the model slot before serving. A failure is logged, not fatal:
    /// the first chat request tries again.
    pub async fn prime_model(&self) {
        if self.model_slot.mode() != ModelSelectionMode::Startup {
            return;
        }

        log::info!("fetching available models...");
        match self
            .model_slot
            .resolve(self.backend.as_ref(), CancellationToken::new())
            .await
        {
            Ok(model) => log::info!("selected model: {}", model),
            Err(e) => log::error!("error selecting model: {}", e.message),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr: SocketAddr = self.config.listen.parse()?;
        self.prime_model().await;

        let server = Arc::new(self);

        let cors = warp::cors()
            .allow_any_origin()
            .allow_headers(vec!["Content-Type", "Accept", "Origin", "X-Requested-With"])
            .allow_methods(vec!["GET", "POST", "OPTIONS"]);

        let routes = create_app(server.clone()).with(cors);

        if LogConfig::get().debug_enabled {
            log::info!("starting chat relay on http://{} (debug mode)", addr);
        } else {
            log::info!("starting chat relay on http://{}", addr);
        }
        log::info!("Gemini API: {}", server.backend.endpoint());
        log::info!("model selection: {:?}", server.config.model_selection);

        warp::serve(routes).run(addr).await;

        Ok(())
    }
}
