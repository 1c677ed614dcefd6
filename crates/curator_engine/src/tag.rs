use curator_core::{ParseIdError, TagId};
use serde::{Deserialize, Serialize};

/// A tag as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TagRecord")]
pub struct Tag {
    #[serde(serialize_with = "serialize_tag_id")]
    pub id: TagId,
    pub name: String,
}

#[derive(Deserialize)]
struct TagRecord {
    id: u64,
    name: String,
}

impl TryFrom<TagRecord> for Tag {
    type Error = ParseIdError;

    fn try_from(record: TagRecord) -> Result<Self, Self::Error> {
        Ok(Tag {
            id: TagId::try_from(record.id)?,
            name: record.name,
        })
    }
}

fn serialize_tag_id<S: serde::Serializer>(id: &TagId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(id.get())
}

/// One page of the tag catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagPage {
    pub data: Vec<Tag>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}
