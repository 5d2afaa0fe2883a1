use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// A renderable avatar reference. `Missing` means the renderer shows only
/// the placeholder glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Avatar {
    /// Self-contained `data:` URI.
    Inline(String),
    /// Pass-through remote URL.
    Remote(String),
    Missing,
}

impl Avatar {
    pub fn href(&self) -> Option<&str> {
        match self {
            Avatar::Inline(uri) => Some(uri),
            Avatar::Remote(url) => Some(url),
            Avatar::Missing => None,
        }
    }
}

/// Resolve an avatar for rendering. This never fails upward: an
/// unreachable, non-2xx or non-image source degrades to `Missing` and the
/// card renders with its placeholder instead.
pub async fn resolve(http: &Client, source_url: &str, inline: bool) -> Avatar {
    if source_url.is_empty() {
        return Avatar::Missing;
    }
    if !inline {
        return Avatar::Remote(source_url.to_string());
    }
    match fetch_data_uri(http, source_url).await {
        Some(uri) => Avatar::Inline(uri),
        None => {
            debug!(source_url, "avatar fetch degraded to placeholder");
            Avatar::Missing
        }
    }
}

async fn fetch_data_uri(http: &Client, url: &str) -> Option<String> {
    let response = http.get(url).send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)?
        .to_str()
        .ok()?
        .to_string();
    if !content_type.starts_with("image/") {
        return None;
    }
    let bytes = response.bytes().await.ok()?;
    Some(format!(
        "data:{};base64,{}",
        content_type,
        STANDARD.encode(&bytes)
    ))
}
