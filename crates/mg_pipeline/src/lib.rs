pub mod image;
pub mod pipeline;
pub mod templates;

pub use image::meme_image_url;
pub use pipeline::{MemePipeline, Stage};
pub use templates::{templates_for, FixedRandom, RandomSource, SeededRandom, TemplateSelector, ThreadRandom};

pub mod prelude {
    pub use super::pipeline::MemePipeline;
    pub use super::templates::{RandomSource, TemplateSelector};
    pub use mg_core::{Config, Error, MemeRecord, MemeRequest, Result};
}
