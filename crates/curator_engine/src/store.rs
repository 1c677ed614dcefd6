use std::collections::BTreeSet;

use curator_core::{AssociationTarget, EntityId, TagId};
use reqwest::Method;

use crate::{RemoteClient, RemoteError, Tag};

/// Remote operations on the tag association of one entity.
///
/// Implementations bind each `AssociationTarget` to its family of endpoints;
/// callers never need to know which one they are talking to.
#[async_trait::async_trait]
pub trait AssociationStore: Send + Sync {
    async fn list(
        &self,
        target: AssociationTarget,
        entity_id: EntityId,
    ) -> Result<BTreeSet<TagId>, RemoteError>;

    async fn add(
        &self,
        target: AssociationTarget,
        entity_id: EntityId,
        tag_id: TagId,
    ) -> Result<(), RemoteError>;

    async fn remove(
        &self,
        target: AssociationTarget,
        entity_id: EntityId,
        tag_id: TagId,
    ) -> Result<(), RemoteError>;
}

/// `GET|POST|DELETE /{collection}/{id}/tags[/{tag_id}]` against the configured server.
#[derive(Debug, Clone)]
pub struct HttpAssociationStore {
    client: RemoteClient,
}

impl HttpAssociationStore {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    /// Current tags including their names, in server order.
    pub async fn tags_of(
        &self,
        target: AssociationTarget,
        entity_id: EntityId,
    ) -> Result<Vec<Tag>, RemoteError> {
        let id = entity_id.to_string();
        let url = self.client.endpoint(&[target.collection(), &id, "tags"])?;
        self.client.get_json(url).await
    }

    async fn mutate(
        &self,
        method: Method,
        target: AssociationTarget,
        entity_id: EntityId,
        tag_id: TagId,
    ) -> Result<(), RemoteError> {
        let id = entity_id.to_string();
        let tag = tag_id.to_string();
        let url = self
            .client
            .endpoint(&[target.collection(), &id, "tags", &tag])?;
        self.client.send_empty(method, url).await
    }
}

#[async_trait::async_trait]
impl AssociationStore for HttpAssociationStore {
    async fn list(
        &self,
        target: AssociationTarget,
        entity_id: EntityId,
    ) -> Result<BTreeSet<TagId>, RemoteError> {
        let tags = self.tags_of(target, entity_id).await?;
        Ok(tags.into_iter().map(|tag| tag.id).collect())
    }

    async fn add(
        &self,
        target: AssociationTarget,
        entity_id: EntityId,
        tag_id: TagId,
    ) -> Result<(), RemoteError> {
        self.mutate(Method::POST, target, entity_id, tag_id).await
    }

    async fn remove(
        &self,
        target: AssociationTarget,
        entity_id: EntityId,
        tag_id: TagId,
    ) -> Result<(), RemoteError> {
        self.mutate(Method::DELETE, target, entity_id, tag_id).await
    }
}
