use std::fmt;
use std::str::FromStr;

/// The entity kinds that carry a tag association in the remote store.
///
/// Each variant is bound to one REST collection; the reconciliation code never
/// branches on the variant itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationTarget {
    Connection,
    Feed,
    Article,
    Person,
    Uri,
}

impl AssociationTarget {
    pub const ALL: [AssociationTarget; 5] = [
        AssociationTarget::Connection,
        AssociationTarget::Feed,
        AssociationTarget::Article,
        AssociationTarget::Person,
        AssociationTarget::Uri,
    ];

    /// Path segment of the collection owning the entity, e.g. `feeds`.
    pub fn collection(self) -> &'static str {
        match self {
            AssociationTarget::Connection => "connections",
            AssociationTarget::Feed => "feeds",
            AssociationTarget::Article => "articles",
            AssociationTarget::Person => "persons",
            AssociationTarget::Uri => "uris",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AssociationTarget::Connection => "connection",
            AssociationTarget::Feed => "feed",
            AssociationTarget::Article => "article",
            AssociationTarget::Person => "person",
            AssociationTarget::Uri => "uri",
        }
    }
}

impl fmt::Display for AssociationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown entity kind {0:?} (expected connection, feed, article, person or uri)")]
pub struct ParseTargetError(pub String);

impl FromStr for AssociationTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AssociationTarget::ALL
            .into_iter()
            .find(|target| {
                target.name().eq_ignore_ascii_case(wanted)
                    || target.collection().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseTargetError(wanted.to_string()))
    }
}
