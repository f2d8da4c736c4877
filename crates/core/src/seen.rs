//! The set of deal ids that have already been notified.

use crate::Deal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Deal ids that have already triggered a notification.
///
/// Loaded from durable storage at the start of a run, extended in memory
/// with newly notified ids, and written back as a whole at the end.
/// An id in this set must never trigger a second notification.
///
/// Serializes as a plain JSON array of id strings, matching the stored blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet(HashSet<String>);

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    /// Record the ids of freshly notified deals.
    pub fn extend_from_deals(&mut self, deals: &[Deal]) {
        for deal in deals {
            if !deal.id.is_empty() {
                self.0.insert(deal.id.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for SeenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
