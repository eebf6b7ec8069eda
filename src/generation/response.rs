use serde_json::Value;

/// The shapes a generation reply is known to arrive in.
///
/// The shape is decided once, when the reply is decoded, so nothing
/// downstream has to probe for fields again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawGenerationResponse {
    Text(String),
    Parts(Vec<Part>),
    Candidates(Vec<Candidate>),
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub parts: Option<Vec<Part>>,
}

impl Part {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    fn from_value(value: &Value) -> Self {
        Self {
            text: value.get("text").and_then(scalar_to_string),
        }
    }
}

impl Candidate {
    pub fn with_parts(parts: Vec<Part>) -> Self {
        Self {
            content: Some(Content { parts: Some(parts) }),
        }
    }

    fn from_value(value: &Value) -> Self {
        let content = value
            .get("content")
            .filter(|c| c.is_object())
            .map(|c| Content {
                parts: c.get("parts").and_then(|p| p.as_array()).map(|parts| {
                    parts.iter().map(Part::from_value).collect()
                }),
            });
        Self { content }
    }
}

impl RawGenerationResponse {
    /// Classifies a decoded reply. Checks run in extraction order: a
    /// non-empty `text` string, then a non-empty `parts` array, then a
    /// non-empty `candidates` array.
    pub fn from_value(value: &Value) -> Self {
        if let Some(text) = value.get("text").and_then(|t| t.as_str())
            && !text.is_empty()
        {
            return Self::Text(text.to_string());
        }

        if let Some(parts) = non_empty_array(value, "parts") {
            return Self::Parts(parts.iter().map(Part::from_value).collect());
        }

        if let Some(candidates) = non_empty_array(value, "candidates") {
            return Self::Candidates(candidates.iter().map(Candidate::from_value).collect());
        }

        Self::Unrecognized
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Parts(_) => "parts",
            Self::Candidates(_) => "candidates",
            Self::Unrecognized => "unrecognized",
        }
    }
}

fn non_empty_array<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .filter(|arr| !arr.is_empty())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
