use async_trait::async_trait;

mod error;
mod extractor;
mod fetcher;
mod generator;
mod key;
mod logging;
mod renderer;
mod server;
mod store;

pub use error::CardError;
pub use extractor::MetadataExtractor;
pub use fetcher::{Fetcher, FetcherConfig};
pub use generator::{normalize_url, CardOutcome, CardService};
pub use key::CacheKey;
pub use logging::{setup_logging, LogConfig};
pub use renderer::CardRenderer;
pub use server::build_router;
pub use store::{ArticleStore, FsArticleStore, MemoryArticleStore};

/// Metadata scraped from a remote document, plus the normalized URL it was
/// fetched from. Either every field is populated or extraction failed;
/// partially filled records never exist.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub manual_redirect: bool,
}

#[async_trait]
pub trait CardGenerator {
    async fn generate_card(
        &self,
        url: &str,
        manual_redirect: bool,
    ) -> Result<CardOutcome, CardError>;
}
