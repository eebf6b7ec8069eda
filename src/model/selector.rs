use crate::constants::GEMINI_MODEL_NAMESPACE;
use crate::error::RelayError;
use crate::model::types::ModelDescriptor;

/// Picks a model from a remote listing according to an ordered preference list.
///
/// Matching is a case-sensitive prefix test on the name inside the `models/`
/// namespace: the remote name `models/gemini-1.5-flash-002` satisfies the
/// preference `gemini-1.5-flash`, while `models/Gemini-1.5-flash` and
/// `tunedModels/gemini-1.5-flash-custom` do not. Preference order always wins
/// over listing order.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    preferences: Vec<String>,
    capability_fallback: bool,
}

impl ModelSelector {
    pub fn new(preferences: Vec<String>, capability_fallback: bool) -> Self {
        Self {
            preferences,
            capability_fallback,
        }
    }

    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn select(&self, available: &[ModelDescriptor]) -> Result<ModelDescriptor, RelayError> {
        for preferred in &self.preferences {
            if let Some(model) = available
                .iter()
                .find(|m| matches_preference(&m.name, preferred))
            {
                log::debug!("preference '{}' matched '{}'", preferred, model.name);
                return Ok(model.clone());
            }
        }

        if self.capability_fallback
            && let Some(model) = available.iter().find(|m| m.supports_generation())
        {
            log::warn!(
                "no preferred model available, falling back to '{}'",
                model.name
            );
            return Ok(model.clone());
        }

        Err(RelayError::no_suitable_model())
    }
}

pub fn matches_preference(remote_name: &str, preferred: &str) -> bool {
    let preferred = bare_model_name(preferred);
    match base_model_name(remote_name) {
        Some(remote) => !preferred.is_empty() && remote.starts_with(preferred),
        None => false,
    }
}

// Names outside the `models/` namespace (tuned models) never match.
fn base_model_name(name: &str) -> Option<&str> {
    match name.strip_prefix(GEMINI_MODEL_NAMESPACE) {
        Some(bare) => Some(bare),
        None if !name.contains('/') => Some(name),
        None => None,
    }
}

/// Strips any namespace (`models/`, `tunedModels/`, ...) from a model name.
pub fn bare_model_name(name: &str) -> &str {
    name.rsplit_once('/').map_or(name, |(_, bare)| bare)
}

/// Adds the `models/` namespace to a bare name; namespaced names pass through.
pub fn namespaced_model_name(name: &str) -> String {
    if name.contains('/') {
        name.to_string()
    } else {
        format!("{}{}", GEMINI_MODEL_NAMESPACE, name)
    }
}
