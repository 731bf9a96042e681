//! Pinned / other partition of a collection listing.

use serde::Serialize;
use smartgrid_core::Collection;

/// Collections split by their pinned flag, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classified {
    pub pinned: Vec<Collection>,
    pub other: Vec<Collection>,
}

impl Classified {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pinned.len() + self.other.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.other.is_empty()
    }
}

/// Partitions `collections` into pinned and other, preserving relative order.
///
/// A collection is pinned only when its metafield value is exactly `"true"`;
/// collections without the metafield, or with any other value, are "other".
#[must_use]
pub fn classify(collections: Vec<Collection>) -> Classified {
    let (pinned, other): (Vec<_>, Vec<_>) =
        collections.into_iter().partition(Collection::is_pinned);
    Classified { pinned, other }
}
