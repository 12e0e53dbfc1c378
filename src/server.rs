use crate::renderer::IndexTemplate;
use crate::{CacheKey, CardError, CardService};
use askama::Template;
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// HTTP surface over the generation pipeline.
///
/// `/generate-url` always answers 200 and reports failures in-band; the
/// fallback resolves `/articles/<key>.html` style paths back to their source
/// URL and degrades every failure to a plain 404, keeping the detail in the
/// server log only.
pub fn build_router(service: Arc<CardService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate-url/{url}", get(generate))
        .route("/generate-url/{url}/{manual_redirect}", get(generate_with_flag))
        .fallback(resolve_article)
        .with_state(service)
}

async fn index() -> Response {
    match IndexTemplate.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            CardError::RenderError(e.to_string()).log();
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn generate(
    State(service): State<Arc<CardService>>,
    Path(url): Path<String>,
) -> Json<Value> {
    generate_response(&service, &url, false).await
}

async fn generate_with_flag(
    State(service): State<Arc<CardService>>,
    Path((url, manual_redirect)): Path<(String, String)>,
) -> Json<Value> {
    generate_response(&service, &url, manual_redirect == "true").await
}

async fn generate_response(
    service: &CardService,
    url: &str,
    manual_redirect: bool,
) -> Json<Value> {
    match service.generate(url, manual_redirect).await {
        Ok(outcome) if outcome.is_cached() => Json(json!({
            "done": true,
            "cached": true,
            "hash": outcome.key().as_str(),
        })),
        Ok(outcome) => Json(json!({
            "done": true,
            "hash": outcome.key().as_str(),
        })),
        Err(e) => {
            e.log();
            Json(json!({
                "done": false,
                "error": e.to_string(),
            }))
        }
    }
}

async fn resolve_article(State(service): State<Arc<CardService>>, uri: Uri) -> Response {
    match resolve(&service, uri.path()).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            e.log();
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

/// Reconstruct the source URL embedded in an unmatched request path and run
/// it through the pipeline, always without the manual-redirect marker. On a
/// hit the stored artifact is read back; on a miss the freshly generated one
/// is.
async fn resolve(service: &CardService, path: &str) -> Result<String, CardError> {
    let mut segment = path.trim_start_matches('/');
    if let Some(rest) = segment.strip_prefix("articles/") {
        segment = rest.strip_suffix(".html").unwrap_or(rest);
    }

    let url = CacheKey::decode(segment)?;
    debug!(url = %url, "Resolved article path to source URL");

    let outcome = service.generate(&url, false).await?;
    service.store().get(outcome.key()).await
}
