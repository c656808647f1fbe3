use async_trait::async_trait;
use mg_core::Result;
use reqwest::Client;
use std::fmt;

/// Where raw page markup comes from.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Plain unauthenticated HTTP GET. The body is returned whatever the status
/// code; only transport failures are errors.
#[derive(Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl fmt::Debug for HttpPageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPageSource")
            .field("client", &"<reqwest::Client>")
            .finish()
    }
}

impl HttpPageSource {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpPageSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());
        Ok(response.text().await?)
    }
}
