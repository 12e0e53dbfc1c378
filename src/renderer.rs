use crate::{CardError, CardMetadata};
use askama::Template;

#[derive(Template)]
#[template(path = "article_card.html")]
struct CardTemplate<'a> {
    title: &'a str,
    description: &'a str,
    image: &'a str,
    url: &'a str,
    manual_redirect: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate;

/// Renders a metadata record into the persisted card markup.
///
/// Pure field substitution: values are interpolated verbatim, with no
/// validation or escaping of what the extractor found. The template itself is
/// compiled into the binary, so the source is loaded exactly once.
#[derive(Clone, Default)]
pub struct CardRenderer;

impl CardRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, record: &CardMetadata) -> Result<String, CardError> {
        CardTemplate {
            title: &record.title,
            description: &record.description,
            image: &record.image,
            url: &record.url,
            manual_redirect: record.manual_redirect,
        }
        .render()
        .map_err(|e| CardError::RenderError(e.to_string()))
    }
}
