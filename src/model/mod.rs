pub mod selector;
pub mod slot;
pub mod types;

pub use selector::{ModelSelector, bare_model_name};
pub use slot::ModelSlot;
pub use types::{ListModelsResponse, ModelDescriptor};
