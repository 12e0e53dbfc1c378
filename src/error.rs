use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum CardError {
    #[error("Failed to parse URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Failed to fetch URL: {0}")]
    FetchError(String),

    #[error("Missing metadata tag: {0}")]
    MissingMetadata(&'static str),

    #[error("Invalid cache key: {0}")]
    DecodeError(String),

    #[error("Cache store error: {0}")]
    CacheError(String),

    #[error("Failed to extract metadata: {0}")]
    ExtractError(String),

    #[error("Failed to render card: {0}")]
    RenderError(String),
}

impl CardError {
    pub fn log(&self) {
        match self {
            CardError::UrlParseError(e) => {
                warn!(error = %e, "URL parsing failed");
            }
            CardError::FetchError(e) => {
                error!(error = %e, "Document fetch failed");
            }
            CardError::MissingMetadata(tag) => {
                error!(tag = %tag, "Required metadata tag not found");
            }
            CardError::DecodeError(e) => {
                warn!(error = %e, "Cache key decoding failed");
            }
            CardError::CacheError(e) => {
                warn!(error = %e, "Cache store operation failed");
            }
            CardError::ExtractError(e) => {
                error!(error = %e, "Metadata extraction failed");
            }
            CardError::RenderError(e) => {
                error!(error = %e, "Card rendering failed");
            }
        }
    }
}
