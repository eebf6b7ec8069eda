pub mod client;
pub mod error;
pub mod response;

pub use client::{CancellableRequest, handle_json_response};
pub use response::{error_reply, html_response, json_response};
