use curator_core::TagId;
use curator_logging::curator_debug;
use reqwest::Method;
use serde::Serialize;

use crate::{FailureKind, RemoteClient, RemoteError, Tag, TagPage};

const LIST_ALL_PAGE_SIZE: u32 = 100;

/// CRUD over the global tag collection (`/tags`).
#[derive(Debug, Clone)]
pub struct TagCatalog {
    client: RemoteClient,
}

#[derive(Serialize)]
struct TagName<'a> {
    name: &'a str,
}

impl TagCatalog {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub async fn page(
        &self,
        page: u32,
        per_page: u32,
        query: Option<&str>,
    ) -> Result<TagPage, RemoteError> {
        let mut url = self.client.endpoint(&["tags"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("per_page", &per_page.to_string());
            if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
                pairs.append_pair("query", query);
            }
        }
        self.client.get_json(url).await
    }

    /// Walks every page, starting at 1, until the server reports the last one.
    pub async fn list_all(&self, query: Option<&str>) -> Result<Vec<Tag>, RemoteError> {
        let mut tags = Vec::new();
        let mut page_no = 1;
        loop {
            let page = self.page(page_no, LIST_ALL_PAGE_SIZE, query).await?;
            curator_debug!(
                "Tag catalog page {}/{}: {} tag(s)",
                page.page,
                page.total_pages,
                page.data.len()
            );
            let exhausted = page.data.is_empty() || page_no >= page.total_pages;
            tags.extend(page.data);
            if exhausted {
                return Ok(tags);
            }
            page_no += 1;
        }
    }

    pub async fn create(&self, name: &str) -> Result<Tag, RemoteError> {
        let name = validate_name(name)?;
        let url = self.client.endpoint(&["tags"])?;
        self.client
            .send_json(Method::POST, url, &TagName { name })
            .await
    }

    pub async fn rename(&self, id: TagId, name: &str) -> Result<Tag, RemoteError> {
        let name = validate_name(name)?;
        let url = self.client.endpoint(&["tags", &id.to_string()])?;
        self.client
            .send_json(Method::PUT, url, &TagName { name })
            .await
    }

    pub async fn delete(&self, id: TagId) -> Result<(), RemoteError> {
        let url = self.client.endpoint(&["tags", &id.to_string()])?;
        self.client.send_empty(Method::DELETE, url).await
    }
}

fn validate_name(name: &str) -> Result<&str, RemoteError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RemoteError::new(
            FailureKind::InvalidPayload,
            "tag name must not be empty",
        ));
    }
    Ok(trimmed)
}
