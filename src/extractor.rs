use crate::{CardError, CardMetadata};
use scraper::{Html, Selector};
use tracing::debug;

const OG_TITLE: &str = "meta[property='og:title']";
const OG_DESCRIPTION: &str = "meta[property='og:description']";
const TWITTER_IMAGE: &str = "meta[name='twitter:image']";

/// Metadata extractor, responsible for pulling the card fields out of a
/// fetched document.
#[derive(Clone, Default)]
pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the three required tags from `html`.
    ///
    /// The record's `url` field is the caller-normalized fetch target, not
    /// whatever raw string the request carried. If any tag is absent the
    /// whole extraction fails; callers never see a partially filled record.
    pub fn extract(
        &self,
        html: &str,
        final_url: &str,
        manual_redirect: bool,
    ) -> Result<CardMetadata, CardError> {
        let document = Html::parse_document(html);

        let title = meta_content(&document, OG_TITLE, "og:title")?;
        let description = meta_content(&document, OG_DESCRIPTION, "og:description")?;
        let image = meta_content(&document, TWITTER_IMAGE, "twitter:image")?;

        debug!(
            url = %final_url,
            title = %title,
            "Extracted card metadata"
        );

        Ok(CardMetadata {
            title,
            description,
            image,
            url: final_url.to_string(),
            manual_redirect,
        })
    }
}

/// Read the `content` attribute of the first element matching `selector`,
/// failing with `MissingMetadata` when no such element (or attribute) exists.
fn meta_content(
    document: &Html,
    selector: &str,
    tag: &'static str,
) -> Result<String, CardError> {
    let selector = Selector::parse(selector)
        .map_err(|e| CardError::ExtractError(format!("Invalid selector: {}", e)))?;

    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(String::from)
        .ok_or(CardError::MissingMetadata(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, description: &str, image: &str) -> String {
        format!(
            r#"<html><head>
            <meta property="og:title" content="{title}">
            <meta property="og:description" content="{description}">
            <meta name="twitter:image" content="{image}">
            </head><body><p>body text</p></body></html>"#
        )
    }

    #[test]
    fn test_extracts_all_fields() {
        let html = page("T", "D", "https://img.example/i.png");
        let record = MetadataExtractor::new()
            .extract(&html, "https://example.com/a", false)
            .unwrap();

        assert_eq!(record.title, "T");
        assert_eq!(record.description, "D");
        assert_eq!(record.image, "https://img.example/i.png");
        assert_eq!(record.url, "https://example.com/a");
        assert!(!record.manual_redirect);
    }

    #[test]
    fn test_url_is_the_normalized_target() {
        let html = page("T", "D", "I");
        let record = MetadataExtractor::new()
            .extract(&html, "https://example.com/a?manualredirect", true)
            .unwrap();
        assert_eq!(record.url, "https://example.com/a?manualredirect");
        assert!(record.manual_redirect);
    }

    #[test]
    fn test_missing_title_fails() {
        let html = r#"<html><head>
            <meta property="og:description" content="D">
            <meta name="twitter:image" content="I">
            </head></html>"#;
        let err = MetadataExtractor::new()
            .extract(html, "https://example.com/a", false)
            .unwrap_err();
        assert!(matches!(err, CardError::MissingMetadata("og:title")));
    }

    #[test]
    fn test_missing_description_fails() {
        let html = r#"<html><head>
            <meta property="og:title" content="T">
            <meta name="twitter:image" content="I">
            </head></html>"#;
        let err = MetadataExtractor::new()
            .extract(html, "https://example.com/a", false)
            .unwrap_err();
        assert!(matches!(err, CardError::MissingMetadata("og:description")));
    }

    #[test]
    fn test_missing_image_fails() {
        let html = r#"<html><head>
            <meta property="og:title" content="T">
            <meta property="og:description" content="D">
            </head></html>"#;
        let err = MetadataExtractor::new()
            .extract(html, "https://example.com/a", false)
            .unwrap_err();
        assert!(matches!(err, CardError::MissingMetadata("twitter:image")));
    }

    #[test]
    fn test_og_image_is_not_a_substitute() {
        // Only the Twitter card image counts; og:image alone does not.
        let html = r#"<html><head>
            <meta property="og:title" content="T">
            <meta property="og:description" content="D">
            <meta property="og:image" content="I">
            </head></html>"#;
        let err = MetadataExtractor::new()
            .extract(html, "https://example.com/a", false)
            .unwrap_err();
        assert!(matches!(err, CardError::MissingMetadata("twitter:image")));
    }

    #[test]
    fn test_reads_content_attribute_not_text() {
        let html = r#"<html><head>
            <meta property="og:title" content="T">inner text
            <meta property="og:description" content="D">
            <meta name="twitter:image" content="I">
            </head></html>"#;
        let record = MetadataExtractor::new()
            .extract(html, "https://example.com/a", false)
            .unwrap();
        assert_eq!(record.title, "T");
    }

    #[test]
    fn test_empty_content_counts_as_present() {
        let html = page("", "D", "I");
        let record = MetadataExtractor::new()
            .extract(&html, "https://example.com/a", false)
            .unwrap();
        assert_eq!(record.title, "");
    }
}
