use anyhow::Result;
use clap::{Parser, Subcommand};
use mg_core::{Config, MemeRequest, DEFAULT_TONE};
use mg_inference::models::{create_model, AVAILABLE_MODELS};
use mg_pipeline::MemePipeline;
use mg_scrappers::HttpPageSource;
use mg_storage::{create_storage, Storage, StorageConfig, StorageKind};
use mg_web::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn article URLs into memes", long_about = None)]
pub struct Cli {
    /// Storage backend: memory or sqlite
    #[arg(long, env = "MG_STORAGE", default_value = "memory")]
    storage: StorageKind,
    #[arg(long, env = "MG_DATABASE_PATH", default_value = "memes.db")]
    database_path: PathBuf,
    #[arg(long, default_value = "openai", help = format!("Caption model. Available models: {}", AVAILABLE_MODELS.join(", ")))]
    model: String,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,
    #[arg(long, env = "MG_MODEL_NAME")]
    model_name: Option<String>,
    #[arg(long, env = "MG_IMAGE_BASE_URL")]
    image_base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "MG_BIND", default_value = "0.0.0.0:3000")]
        bind: String,
    },
    /// Generate a single meme and print it as JSON
    Generate {
        #[arg(long)]
        url: String,
        #[arg(long, default_value = DEFAULT_TONE)]
        tone: String,
        /// Ignore cached article content
        #[arg(long)]
        regenerate: bool,
    },
    /// Print the most recent memes
    Recent {
        #[arg(long, default_value_t = 6)]
        limit: usize,
    },
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(url) = &self.openai_base_url {
            config = config.with_openai_base_url(url.clone());
        }
        if let Some(name) = &self.model_name {
            config.model_name = name.clone();
        }
        if let Some(url) = &self.image_base_url {
            config = config.with_image_base_url(url.clone());
        }
        config
    }
}

/// Only `serve` and `generate` need a caption model, so only they pay for
/// its credential check.
fn build_pipeline(model: &str, config: Config, storage: Storage) -> mg_core::Result<MemePipeline> {
    let model = create_model(model, &config)?;
    info!("🧠 Caption model initialized successfully (using {})", model.name());
    Ok(MemePipeline::new(config, storage, Arc::new(HttpPageSource::new()), model))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let config = cli.config();
    config.validate()?;

    let storage = create_storage(&StorageConfig {
        kind: cli.storage,
        database_path: cli.database_path.clone(),
    })
    .await?;
    info!("💾 Storage initialized successfully (using {})", cli.storage);

    match &cli.command {
        Commands::Serve { bind } => {
            let pipeline = build_pipeline(&cli.model, config, storage)?;
            let listener = tokio::net::TcpListener::bind(bind).await?;
            mg_web::serve(listener, AppState::new(pipeline)).await?;
        }
        Commands::Generate { url, tone, regenerate } => {
            let pipeline = build_pipeline(&cli.model, config, storage)?;
            info!("🎨 Generating meme for {}", url);
            let request = MemeRequest {
                url: Some(url.clone()),
                tone: Some(tone.clone()),
                regenerate: *regenerate,
            };
            let record = pipeline.generate(&request).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Recent { limit } => {
            let records = storage.records.recent_records(*limit).await?;
            if records.is_empty() {
                println!("No memes yet");
            }
            for record in records {
                println!(
                    "{}  {}  {}\n    {}",
                    record.created_at.format("%Y-%m-%d %H:%M"),
                    record.id,
                    record.article_title,
                    record.meme_image_url
                );
            }
        }
    }

    Ok(())
}
