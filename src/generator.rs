use crate::{
    ArticleStore, CacheKey, CardError, CardGenerator, CardMetadata, CardRenderer, Fetcher,
    MetadataExtractor,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

/// Marker written into the normalized URL's query when the caller asked for a
/// manual redirect, signaling the intent to the fetched page.
const MANUAL_REDIRECT_MARKER: &str = "manualredirect";

/// Normalize a raw URL for fetching: parse it, then replace the query with
/// the manual-redirect marker (flag set) or strip it (flag clear), and
/// re-serialize. The raw string, not this result, is what keys the cache.
pub fn normalize_url(url: &str, manual_redirect: bool) -> Result<String, CardError> {
    let mut parsed = Url::parse(url)?;
    if manual_redirect {
        parsed.set_query(Some(MANUAL_REDIRECT_MARKER));
    } else {
        parsed.set_query(None);
    }
    Ok(parsed.to_string())
}

/// Result of one pass through the pipeline.
///
/// A hit reports only that the key exists; the stored artifact is not re-read
/// or re-validated here.
#[derive(Debug, Clone)]
pub enum CardOutcome {
    Cached { key: CacheKey },
    Generated { key: CacheKey, metadata: CardMetadata },
}

impl CardOutcome {
    pub fn key(&self) -> &CacheKey {
        match self {
            CardOutcome::Cached { key } => key,
            CardOutcome::Generated { key, .. } => key,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, CardOutcome::Cached { .. })
    }
}

/// Stateless orchestration of key derivation, cache lookup, fetch, extract,
/// render and store. Each call is one pass; no coordination exists across
/// concurrent calls for the same key, so two racing first-requests can both
/// generate and the last write wins.
#[derive(Clone)]
pub struct CardService {
    fetcher: Fetcher,
    extractor: MetadataExtractor,
    renderer: CardRenderer,
    store: Arc<dyn ArticleStore>,
}

impl CardService {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self::new_with_fetcher(store, Fetcher::new())
    }

    pub fn new_with_fetcher(store: Arc<dyn ArticleStore>, fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            extractor: MetadataExtractor::new(),
            renderer: CardRenderer::new(),
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn ArticleStore> {
        &self.store
    }

    #[instrument(level = "debug", skip(self), err)]
    pub async fn generate(
        &self,
        url: &str,
        manual_redirect: bool,
    ) -> Result<CardOutcome, CardError> {
        let final_url = normalize_url(url, manual_redirect)?;
        // The key comes from the raw input, not final_url: requests differing
        // only in the manual-redirect flag collapse onto one entry, and the
        // first generation wins. Known ambiguity carried over as-is.
        let key = CacheKey::encode(url);

        if self.store.has(&key).await {
            debug!(key = %key, "Cache hit, skipping fetch");
            return Ok(CardOutcome::Cached { key });
        }

        let html = self.fetcher.fetch(&final_url).await?;
        let metadata = self.extractor.extract(&html, &final_url, manual_redirect)?;
        let artifact = self.renderer.render(&metadata)?;
        // Reached only when every stage succeeded; a failed generation leaves
        // no entry behind and the next request retries from scratch.
        self.store.put(&key, &artifact).await?;

        debug!(key = %key, url = %final_url, "Generated and stored card");
        Ok(CardOutcome::Generated { key, metadata })
    }
}

#[async_trait]
impl CardGenerator for CardService {
    async fn generate_card(
        &self,
        url: &str,
        manual_redirect: bool,
    ) -> Result<CardOutcome, CardError> {
        self.generate(url, manual_redirect).await
    }
}
