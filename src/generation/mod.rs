pub mod extractor;
pub mod request;
pub mod response;

pub use extractor::extract_text;
pub use request::GenerateContentRequest;
pub use response::{Candidate, Content, Part, RawGenerationResponse};
