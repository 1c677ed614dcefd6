use std::fmt;
use std::sync::Arc;

use curator_core::{EntityId, NormalizedContent};
use curator_logging::{curator_debug, curator_warn};
use reqwest::{Method, Url};
use serde::Deserialize;

use crate::convert::{Converter, MarkdownConverter};
use crate::decode::decode_html;
use crate::http::error_field;
use crate::locate::{HeuristicLocator, Locator};
use crate::RemoteClient;

/// Resources for which the server can hand out pre-normalized Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentResource {
    Uri,
    Article,
}

impl ContentResource {
    pub fn collection(self) -> &'static str {
        match self {
            ContentResource::Uri => "uris",
            ContentResource::Article => "articles",
        }
    }
}

impl fmt::Display for ContentResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentResource::Uri => write!(f, "URI"),
            ContentResource::Article => write!(f, "article"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Download the page itself and normalize it locally.
    RawHtml { url: String },
    /// Ask the server for `/{collection}/{id}/content`.
    Normalized {
        resource: ContentResource,
        id: EntityId,
    },
}

#[derive(Deserialize)]
struct ContentPayload {
    markdown: Option<String>,
    error: Option<String>,
}

/// Fetches content and always answers with a `NormalizedContent` value.
///
/// Failures are reported through the `Error` variant, never as `Err` or a
/// panic, so callers can fall back to whatever description they already have.
/// Output is never truncated here.
#[derive(Clone)]
pub struct ContentFetchOrchestrator {
    client: RemoteClient,
    locator: Arc<dyn Locator>,
    converter: Arc<dyn Converter>,
}

impl ContentFetchOrchestrator {
    pub fn new(client: RemoteClient) -> Self {
        Self::with_pipeline(client, Arc::new(HeuristicLocator), Arc::new(MarkdownConverter))
    }

    pub fn with_pipeline(
        client: RemoteClient,
        locator: Arc<dyn Locator>,
        converter: Arc<dyn Converter>,
    ) -> Self {
        Self {
            client,
            locator,
            converter,
        }
    }

    pub async fn fetch(&self, source: &ContentSource) -> NormalizedContent {
        match source {
            ContentSource::RawHtml { url } => self.fetch_page(url).await,
            ContentSource::Normalized { resource, id } => {
                self.fetch_normalized(*resource, *id).await
            }
        }
    }

    /// Locate then convert; the pure half of the raw HTML path.
    pub fn normalize_html(&self, html: &str, base_url: Option<&Url>) -> NormalizedContent {
        let region = self.locator.locate(html);
        curator_debug!(
            "Located content via {:?} ({} of {} bytes)",
            region.strategy,
            region.html.len(),
            html.len()
        );
        self.converter.convert(&region, base_url)
    }

    async fn fetch_page(&self, url: &str) -> NormalizedContent {
        let page = match self.client.fetch_page(url).await {
            Ok(page) => page,
            Err(err) => {
                curator_warn!("Fetching {} failed: {}", url, err);
                return NormalizedContent::Error(format!(
                    "Failed to fetch article: {}",
                    err.user_message()
                ));
            }
        };

        let decoded = decode_html(
            &page.bytes,
            page.content_type.as_deref(),
            Some(&page.final_url),
        );
        if decoded.had_errors {
            curator_warn!(
                "Invalid {} byte sequences in {} were replaced",
                decoded.encoding_label,
                page.final_url
            );
        }
        curator_debug!(
            "Decoded {} bytes from {} as {}",
            page.bytes.len(),
            page.final_url,
            decoded.encoding_label
        );
        self.normalize_html(&decoded.html, Some(&page.final_url))
    }

    async fn fetch_normalized(&self, resource: ContentResource, id: EntityId) -> NormalizedContent {
        let id_segment = id.to_string();
        let request = self
            .client
            .endpoint(&[resource.collection(), &id_segment, "content"])
            .map(|url| self.client.request(Method::GET, url));
        let response = match request {
            Ok(request) => self.client.send(request).await,
            Err(err) => Err(err),
        };
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                curator_warn!("Fetching content of {} {} failed: {}", resource, id, err);
                return NormalizedContent::Error(format!(
                    "Failed to fetch {resource} content: {}",
                    err.user_message()
                ));
            }
        };

        if !response.status.is_success() {
            let message =
                error_field(&response.body).unwrap_or_else(|| response.status.to_string());
            curator_warn!("Content of {} {} unavailable: {}", resource, id, message);
            return NormalizedContent::Error(message);
        }

        match serde_json::from_str::<ContentPayload>(&response.body) {
            Ok(ContentPayload {
                error: Some(error), ..
            }) => NormalizedContent::Error(error),
            Ok(ContentPayload {
                markdown: Some(markdown),
                ..
            }) => NormalizedContent::Markdown(markdown),
            Ok(_) => NormalizedContent::Error(format!(
                "Failed to fetch {resource} content: response carried no markdown"
            )),
            Err(err) => NormalizedContent::Error(format!(
                "Failed to fetch {resource} content: invalid payload ({err})"
            )),
        }
    }
}
