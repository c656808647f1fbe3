use std::sync::Arc;
use mg_core::{ChatModel, Config, Error, Result};

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Names accepted by [`create_model`].
pub const AVAILABLE_MODELS: &[&str] = &["openai", "dummy"];

pub fn create_model(name: &str, config: &Config) -> Result<Arc<dyn ChatModel>> {
    match name.to_lowercase().as_str() {
        "openai" => Ok(Arc::new(OpenAiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model: {}. Available models: {}",
            other,
            AVAILABLE_MODELS.join(", ")
        ))),
    }
}
