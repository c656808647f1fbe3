use mg_core::{
    ArticleData, ChatModel, Config, Error, MemeRecord, MemeRequest, NewMemeRecord, RecordStore, Result,
    DEFAULT_TONE,
};
use mg_inference::{CaptionGenerator, CategoryClassifier};
use mg_scrappers::{ContentFetcher, PageSource};
use mg_storage::{ContentCache, Storage};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};
use crate::image::meme_image_url;
use crate::templates::{RandomSource, TemplateSelector};

/// Steps of one generation request, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CacheLookup,
    Fetch,
    Classify,
    SelectTemplate,
    Caption,
    Assemble,
    Persist,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CacheLookup => "cache-lookup",
            Stage::Fetch => "fetch",
            Stage::Classify => "classify",
            Stage::SelectTemplate => "select-template",
            Stage::Caption => "caption",
            Stage::Assemble => "assemble",
            Stage::Persist => "persist",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Turns an article URL into a persisted meme. Requests run strictly in
/// sequence and share nothing but the stores.
pub struct MemePipeline {
    config: Config,
    cache: ContentCache,
    fetcher: ContentFetcher,
    classifier: CategoryClassifier,
    selector: TemplateSelector,
    captions: CaptionGenerator,
    records: Arc<dyn RecordStore>,
}

impl fmt::Debug for MemePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemePipeline")
            .field("config", &self.config)
            .field("fetcher", &self.fetcher)
            .field("selector", &self.selector)
            .field("captions", &self.captions)
            .field("records", &"<dyn RecordStore>")
            .finish()
    }
}

impl MemePipeline {
    pub fn new(
        config: Config,
        storage: Storage,
        source: Arc<dyn PageSource>,
        model: Arc<dyn ChatModel>,
    ) -> Self {
        let cache = ContentCache::new(storage.cache.clone(), config.cache_ttl);
        let fetcher = ContentFetcher::new(source, cache.clone(), config.max_content_chars);
        let captions = CaptionGenerator::new(model, &config);
        Self {
            config,
            cache,
            fetcher,
            classifier: CategoryClassifier::default(),
            selector: TemplateSelector::default(),
            captions,
            records: storage.records,
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.selector = TemplateSelector::new(random);
        self
    }

    pub fn with_classifier(mut self, classifier: CategoryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn records(&self) -> &Arc<dyn RecordStore> {
        &self.records
    }

    /// Run one request end to end and return the inserted record.
    ///
    /// Fails only on a missing URL, a missing model credential or a failed
    /// record insert. Fetch and caption problems fall back to placeholder
    /// values.
    pub async fn generate(&self, request: &MemeRequest) -> Result<MemeRecord> {
        let url = request
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(Error::MissingUrl)?;
        self.config.api_key()?;

        let tone = request
            .tone
            .as_deref()
            .map(str::trim)
            .filter(|tone| !tone.is_empty())
            .unwrap_or(DEFAULT_TONE);

        info!("📰 Processing URL: {} with tone: {}", url, tone);
        let article = self.load_article(url, request.regenerate).await;

        enter(Stage::Classify, url);
        let category = self.classifier.classify(&article.title, &article.content);

        enter(Stage::SelectTemplate, url);
        let template_id = self.selector.select(category);
        info!("Selected template: {} for {} content", template_id, category);

        enter(Stage::Caption, url);
        let captions = self
            .captions
            .generate(&article.title, &article.content, tone, template_id)
            .await;

        enter(Stage::Assemble, url);
        let meme_image_url = meme_image_url(&self.config.image_base_url, template_id, &captions);
        info!("Generated meme URL: {}", meme_image_url);

        enter(Stage::Persist, url);
        let record = self
            .records
            .insert_record(NewMemeRecord {
                url: url.to_string(),
                article_title: article.title,
                article_content: article.content,
                tone: tone.to_string(),
                template_id: template_id.to_string(),
                top_text: captions.top_text,
                bottom_text: captions.bottom_text,
                meme_image_url,
            })
            .await
            .map_err(|e| {
                error!("Error saving meme: {}", e);
                e
            })?;

        enter(Stage::Done, url);
        info!("✨ Meme saved successfully: {}", record.id);
        Ok(record)
    }

    async fn load_article(&self, url: &str, regenerate: bool) -> ArticleData {
        if !regenerate {
            enter(Stage::CacheLookup, url);
            if let Some(article) = self.cache.get(url).await {
                info!("Using cached data for URL: {}", url);
                return article;
            }
        }

        enter(Stage::Fetch, url);
        self.fetcher.fetch(url).await
    }
}

fn enter(stage: Stage, url: &str) {
    debug!(%stage, url, "pipeline stage");
}
