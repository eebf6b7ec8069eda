/// Gemini REST API
pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_MODELS_ENDPOINT: &str = "/models";
pub const GEMINI_GENERATE_METHOD: &str = "generateContent";
pub const GEMINI_MODEL_NAMESPACE: &str = "models/";
pub const GEMINI_LIST_PAGE_SIZE: u32 = 1000;

/// Models tried in order when no explicit model is configured
pub const DEFAULT_PREFERRED_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-pro-exp",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
];

/// Returned when a generation reply has no recognizable text
pub const UNPARSABLE_RESPONSE_PLACEHOLDER: &str = "Could not parse response.";

/// Prefix put in front of every error detail shown to the chat widget
pub const REPLY_ERROR_PREFIX: &str = "Error: ";

/// Response headers
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const HEADER_CACHE_CONTROL: &str = "no-cache";
pub const HEADER_ACCESS_CONTROL_ALLOW_ORIGIN: &str = "*";
pub const HEADER_ACCESS_CONTROL_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const HEADER_ACCESS_CONTROL_ALLOW_HEADERS: &str = "Content-Type";

/// Error messages
pub const ERROR_MISSING_MESSAGE: &str = "Missing 'message' field";
pub const ERROR_EMPTY_MESSAGE: &str = "'message' must be a non-empty string";
pub const ERROR_MISSING_CREDENTIAL: &str =
    "GEMINI_API_KEY is not set. Pass --api-key or export GEMINI_API_KEY";
pub const ERROR_NO_SUITABLE_MODEL: &str =
    "No suitable models found. Please check your API key permissions";
pub const ERROR_TIMEOUT: &str = "Gemini API request timed out";
pub const ERROR_CANCELLED: &str = "Request cancelled by client";
pub const ERROR_GEMINI_UNAVAILABLE: &str = "Gemini API not reachable";

/// Logging prefixes
pub const LOG_PREFIX_SUCCESS: &str = "✅";
pub const LOG_PREFIX_ERROR: &str = "❌";
pub const LOG_PREFIX_WARNING: &str = "⚠️";

/// Maximum accepted JSON body size (bytes)
pub const MAX_JSON_BODY_SIZE_BYTES: u64 = 1024 * 1024;

/// Key under which the selected model is stored in the model slot
pub const MODEL_SLOT_KEY: &str = "selected";
