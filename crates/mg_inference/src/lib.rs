pub mod captions;
pub mod classifier;
pub mod models;

pub use captions::{parse_captions, CaptionGenerator};
pub use classifier::CategoryClassifier;
pub use models::{create_model, DummyModel, OpenAiModel};

pub mod prelude {
    pub use super::captions::CaptionGenerator;
    pub use super::classifier::CategoryClassifier;
    pub use super::models::create_model;
    pub use mg_core::{CaptionPair, Category, ChatModel, Config, Error, Result};
}
