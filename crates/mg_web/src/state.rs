use mg_pipeline::MemePipeline;

pub struct AppState {
    pub pipeline: MemePipeline,
}

impl AppState {
    pub fn new(pipeline: MemePipeline) -> Self {
        Self { pipeline }
    }
}
