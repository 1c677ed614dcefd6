use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Identifier of an entity (connection, feed, article, person or URI) in the remote store.
pub type EntityId = u64;

/// Opaque, strictly positive tag identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(NonZeroU64);

impl TagId {
    /// Returns `None` for zero, which the remote store never hands out.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("tag id must be a positive integer, got {0:?}")]
    NotPositive(String),
}

impl FromStr for TagId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u64>()
            .ok()
            .and_then(TagId::new)
            .ok_or_else(|| ParseIdError::NotPositive(trimmed.to_string()))
    }
}

impl TryFrom<u64> for TagId {
    type Error = ParseIdError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        TagId::new(raw).ok_or_else(|| ParseIdError::NotPositive(raw.to_string()))
    }
}
