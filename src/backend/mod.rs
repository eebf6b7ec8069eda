pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::RelayError;
use crate::generation::RawGenerationResponse;
use crate::model::ModelDescriptor;

/// The remote generative-language service the relay talks to.
#[async_trait]
pub trait GenerativeBackend: Send + Sync + 'static {
    /// Lists every model visible to the configured credential.
    async fn list_models(
        &self,
        cancellation_token: CancellationToken,
    ) -> Result<Vec<ModelDescriptor>, RelayError>;

    /// Runs a single-turn generation against `model` (a namespaced remote name).
    async fn generate(
        &self,
        model: &str,
        message: &str,
        cancellation_token: CancellationToken,
    ) -> Result<RawGenerationResponse, RelayError>;

    /// Base URL shown in health output.
    fn endpoint(&self) -> &str;
}
