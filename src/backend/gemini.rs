use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::backend::GenerativeBackend;
use crate::constants::{
    GEMINI_GENERATE_METHOD, GEMINI_LIST_PAGE_SIZE, GEMINI_MODELS_ENDPOINT, LOG_PREFIX_SUCCESS,
    LOG_PREFIX_WARNING,
};
use crate::error::RelayError;
use crate::generation::{GenerateContentRequest, RawGenerationResponse};
use crate::http::{CancellableRequest, handle_json_response};
use crate::logging::log_timed;
use crate::model::{ListModelsResponse, ModelDescriptor};

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        request_timeout: Duration,
    ) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                RelayError::internal_server_error(&format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn models_url(&self, page_token: Option<&str>) -> Result<url::Url, RelayError> {
        let mut url = self.parse_url(&format!("{}{}", self.base_url, GEMINI_MODELS_ENDPOINT))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("key", &self.api_key)
                .append_pair("pageSize", &GEMINI_LIST_PAGE_SIZE.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }
        Ok(url)
    }

    pub fn generate_url(&self, model: &str) -> Result<url::Url, RelayError> {
        let mut url = self.parse_url(&format!(
            "{}/{}:{}",
            self.base_url, model, GEMINI_GENERATE_METHOD
        ))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn parse_url(&self, raw: &str) -> Result<url::Url, RelayError> {
        url::Url::parse(raw).map_err(|e| {
            RelayError::internal_server_error(&format!("invalid Gemini API URL: {}", e))
        })
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn list_models(
        &self,
        cancellation_token: CancellationToken,
    ) -> Result<Vec<ModelDescriptor>, RelayError> {
        let start_time = Instant::now();
        let request = CancellableRequest::new(&self.client, cancellation_token.clone());
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = self.models_url(page_token.as_deref())?;
            let response = request
                .make_request(Method::GET, url.as_str(), None::<Value>)
                .await?;
            let body = handle_json_response(response, cancellation_token.clone()).await?;

            let page: ListModelsResponse = serde_json::from_value(body).map_err(|e| {
                RelayError::remote_unavailable(
                    &format!("invalid model listing from Gemini API: {}", e),
                    None,
                )
            })?;

            let next = page.next_page().map(str::to_string);
            models.extend(page.models.into_iter().map(ModelDescriptor::from));

            match next {
                Some(token) if page_token.as_deref() != Some(token.as_str()) => {
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        log_timed(
            LOG_PREFIX_SUCCESS,
            &format!("listed {} models", models.len()),
            start_time,
        );
        Ok(models)
    }

    async fn generate(
        &self,
        model: &str,
        message: &str,
        cancellation_token: CancellationToken,
    ) -> Result<RawGenerationResponse, RelayError> {
        let start_time = Instant::now();
        let url = self.generate_url(model)?;
        let request = CancellableRequest::new(&self.client, cancellation_token.clone());

        let response = request
            .make_request(
                Method::POST,
                url.as_str(),
                Some(GenerateContentRequest::single_turn(message)),
            )
            .await?;
        let body = handle_json_response(response, cancellation_token).await?;

        if let Some(reason) = body
            .get("promptFeedback")
            .and_then(|f| f.get("blockReason"))
            .and_then(|r| r.as_str())
        {
            log_timed(
                LOG_PREFIX_WARNING,
                &format!("prompt blocked by Gemini: {}", reason),
                start_time,
            );
        }

        let raw = RawGenerationResponse::from_value(&body);
        log::debug!("generation reply shape: {}", raw.shape_name());
        Ok(raw)
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
