use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};

use crate::http::{map_reqwest_error, status_error};
use crate::{FailureKind, RemoteClient, RemoteError};

/// Raw bytes of a page downloaded outside the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub bytes: Vec<u8>,
    pub final_url: Url,
    pub content_type: Option<String>,
}

impl RemoteClient {
    /// Downloads an arbitrary web page, enforcing the size and content-type limits.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, RemoteError> {
        let settings = self.settings();
        let parsed = Url::parse(url)
            .map_err(|err| RemoteError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .request(Method::GET, parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > settings.max_content_bytes {
                return Err(too_large(settings.max_content_bytes, content_len));
            }
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !settings.is_content_type_allowed(ct) {
                return Err(RemoteError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    format!("unsupported content type {ct}"),
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > settings.max_content_bytes {
                return Err(too_large(settings.max_content_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchedPage {
            bytes,
            final_url,
            content_type,
        })
    }
}

fn too_large(max_bytes: u64, actual: u64) -> RemoteError {
    RemoteError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        format!("response too large ({actual} bytes, limit {max_bytes})"),
    )
}
