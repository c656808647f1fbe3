pub mod extract;
pub mod fetcher;
pub mod source;

pub use fetcher::{ContentFetcher, FALLBACK_CONTENT};
pub use source::{HttpPageSource, PageSource};

pub mod prelude {
    pub use super::fetcher::ContentFetcher;
    pub use super::source::{HttpPageSource, PageSource};
    pub use mg_core::{ArticleData, Error, Result};
}
