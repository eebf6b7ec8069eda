use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::constants::GEMINI_GENERATE_METHOD;

/// Model entry as returned by `GET /models`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteModelData {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub input_token_limit: Option<u64>,
    #[serde(default)]
    pub output_token_limit: Option<u64>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

/// One page of `GET /models`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<RemoteModelData>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl ListModelsResponse {
    /// The token for the following page, if there is one.
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// A remote model and what it can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Remote identifier, usually namespaced (`models/gemini-2.0-flash`).
    pub name: String,
    pub capabilities: BTreeSet<String>,
    pub display_name: Option<String>,
    pub input_token_limit: Option<u64>,
    pub output_token_limit: Option<u64>,
}

impl ModelDescriptor {
    pub fn new<I, S>(name: &str, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
            display_name: None,
            input_token_limit: None,
            output_token_limit: None,
        }
    }

    pub fn supports_generation(&self) -> bool {
        self.capabilities.contains(GEMINI_GENERATE_METHOD)
    }

    pub fn to_json(&self, selected: bool) -> Value {
        json!({
            "name": self.name,
            "display_name": self.display_name,
            "capabilities": self.capabilities,
            "input_token_limit": self.input_token_limit,
            "output_token_limit": self.output_token_limit,
            "supports_generation": self.supports_generation(),
            "selected": selected,
        })
    }
}

impl From<RemoteModelData> for ModelDescriptor {
    fn from(data: RemoteModelData) -> Self {
        Self {
            name: data.name,
            capabilities: data.supported_generation_methods.into_iter().collect(),
            display_name: data.display_name.filter(|n| !n.is_empty()),
            input_token_limit: data.input_token_limit,
            output_token_limit: data.output_token_limit,
        }
    }
}
