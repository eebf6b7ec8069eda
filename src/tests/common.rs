use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use crate::backend::GenerativeBackend;
use crate::config::Config;
use crate::error::RelayError;
use crate::generation::RawGenerationResponse;
use crate::model::ModelDescriptor;

/// In-memory stand-in for the Gemini API.
pub struct MockBackend {
    models: Mutex<Result<Vec<ModelDescriptor>, RelayError>>,
    reply: Mutex<Result<RawGenerationResponse, RelayError>>,
    list_calls: AtomicUsize,
    generations: Mutex<Vec<(String, String)>>,
}

impl MockBackend {
    pub fn new(models: Vec<ModelDescriptor>, reply: RawGenerationResponse) -> Self {
        Self {
            models: Mutex::new(Ok(models)),
            reply: Mutex::new(Ok(reply)),
            list_calls: AtomicUsize::new(0),
            generations: Mutex::new(Vec::new()),
        }
    }

    pub fn replying_text(text: &str) -> Self {
        Self::new(default_models(), RawGenerationResponse::Text(text.to_string()))
    }

    pub fn fail_listing(&self, err: RelayError) {
        *self.models.lock().unwrap() = Err(err);
    }

    pub fn set_models(&self, models: Vec<ModelDescriptor>) {
        *self.models.lock().unwrap() = Ok(models);
    }

    pub fn fail_generation(&self, err: RelayError) {
        *self.reply.lock().unwrap() = Err(err);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn generations(&self) -> Vec<(String, String)> {
        self.generations.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn list_models(
        &self,
        _cancellation_token: CancellationToken,
    ) -> Result<Vec<ModelDescriptor>, RelayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.models.lock().unwrap().clone()
    }

    async fn generate(
        &self,
        model: &str,
        message: &str,
        _cancellation_token: CancellationToken,
    ) -> Result<RawGenerationResponse, RelayError> {
        self.generations
            .lock()
            .unwrap()
            .push((model.to_string(), message.to_string()));
        self.reply.lock().unwrap().clone()
    }

    fn endpoint(&self) -> &str {
        "http://mock.invalid/v1beta"
    }
}

pub fn generate_model(name: &str) -> ModelDescriptor {
    ModelDescriptor::new(name, ["generateContent", "countTokens"])
}

pub fn embed_model(name: &str) -> ModelDescriptor {
    ModelDescriptor::new(name, ["embedContent"])
}

pub fn default_models() -> Vec<ModelDescriptor> {
    vec![
        embed_model("models/embedding-001"),
        generate_model("models/gemini-1.5-pro"),
        generate_model("models/gemini-2.0-flash"),
    ]
}

pub fn test_config(extra_args: &[&str]) -> Config {
    let mut args = vec!["gemini-chat-relay", "--api-key", "test-key"];
    args.extend_from_slice(extra_args);
    Config::parse_from(args)
}
