use std::time::{Duration, Instant};

use moka::future::Cache;
use tokio_util::sync::CancellationToken;

use crate::backend::GenerativeBackend;
use crate::config::ModelSelectionMode;
use crate::constants::{LOG_PREFIX_SUCCESS, MODEL_SLOT_KEY};
use crate::error::RelayError;
use crate::logging::log_timed;
use crate::model::selector::{ModelSelector, namespaced_model_name};

/// Holds the model the chat handler sends requests to.
///
/// In `Startup` mode the selection is kept in a TTL-bounded cache entry. It
/// is dropped by [`ModelSlot::invalidate`] and recomputed on next use.
pub struct ModelSlot {
    mode: ModelSelectionMode,
    static_model: Option<String>,
    selector: ModelSelector,
    cache: Cache<String, String>,
}

impl ModelSlot {
    pub fn new(
        mode: ModelSelectionMode,
        static_model: Option<&str>,
        selector: ModelSelector,
        ttl: Duration,
    ) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();

        Self {
            mode,
            static_model: static_model
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(namespaced_model_name),
            selector,
            cache,
        }
    }

    pub fn mode(&self) -> ModelSelectionMode {
        self.mode
    }

    pub fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    /// The model currently held, without contacting the backend.
    pub async fn current(&self) -> Option<String> {
        match self.mode {
            ModelSelectionMode::Static => self.static_model.clone(),
            ModelSelectionMode::Startup => self.cache.get(MODEL_SLOT_KEY).await,
            ModelSelectionMode::PerRequest => None,
        }
    }

    pub async fn resolve(
        &self,
        backend: &dyn GenerativeBackend,
        cancellation_token: CancellationToken,
    ) -> Result<String, RelayError> {
        match self.mode {
            ModelSelectionMode::Static => self
                .static_model
                .clone()
                .ok_or_else(RelayError::no_suitable_model),
            ModelSelectionMode::PerRequest => self.select(backend, cancellation_token).await,
            ModelSelectionMode::Startup => self
                .cache
                .try_get_with(
                    MODEL_SLOT_KEY.to_string(),
                    self.select(backend, cancellation_token),
                )
                .await
                .map_err(|e| (*e).clone()),
        }
    }

    pub async fn invalidate(&self) {
        if self.mode == ModelSelectionMode::Startup {
            log::info!("dropping selected model");
            self.cache.invalidate(MODEL_SLOT_KEY).await;
        }
    }

    pub async fn refresh(
        &self,
        backend: &dyn GenerativeBackend,
        cancellation_token: CancellationToken,
    ) -> Result<String, RelayError> {
        self.invalidate().await;
        self.resolve(backend, cancellation_token).await
    }

    async fn select(
        &self,
        backend: &dyn GenerativeBackend,
        cancellation_token: CancellationToken,
    ) -> Result<String, RelayError> {
        let start_time = Instant::now();
        let available = backend.list_models(cancellation_token).await?;
        let selected = self.selector.select(&available)?;
        log_timed(
            LOG_PREFIX_SUCCESS,
            &format!("using model: {}", selected.name),
            start_time,
        );
        Ok(selected.name)
    }
}
