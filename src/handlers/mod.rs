pub mod chat;
pub mod context;
pub mod health;
pub mod models;
pub mod page;

pub use chat::{ChatRequest, handle_chat, run_chat};
pub use context::RequestContext;
pub use health::handle_health_check;
pub use models::{handle_list_models, handle_refresh_model};
pub use page::handle_index;
