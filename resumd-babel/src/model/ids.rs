//! Identity tokens for sections and items.
//!
//! Ids come from an [`IdGenerator`] injected when a document is created. Every
//! snapshot derived from that document shares the same generator, so an id is
//! handed out at most once for the lifetime of the document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identity of a section or item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(token: impl Into<String>) -> Self {
        Id(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(token: &str) -> Self {
        Id::new(token)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Source of fresh ids.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    fn next_id(&self) -> Id;
}

/// Monotonic counter producing `"{prefix}{n}"` tokens.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub const DEFAULT_PREFIX: &'static str = "id-";

    pub fn new() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    /// A counter that continues after the highest `"{prefix}{n}"` among `existing`.
    ///
    /// Used when a document is reloaded with its ids, so newly added items can
    /// never collide with stored ones. A stored `u64::MAX` has no successor
    /// and is skipped.
    pub fn after<'a>(existing: impl IntoIterator<Item = &'a Id>) -> Self {
        let ids = Self::new();
        let next = existing
            .into_iter()
            .filter_map(|id| id.as_str().strip_prefix(Self::DEFAULT_PREFIX))
            .filter_map(|n| n.parse::<u64>().ok())
            .filter_map(|n| n.checked_add(1))
            .max()
            .unwrap_or(1);
        ids.next.store(next, Ordering::Relaxed);
        ids
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Id {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Id(format!("{}{n}", self.prefix))
    }
}

/// Random UUID v4 tokens.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> Id {
        Id(uuid::Uuid::new_v4().to_string())
    }
}
