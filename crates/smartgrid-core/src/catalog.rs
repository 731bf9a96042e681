//! Catalog entities as the browser holds them in session state.
//!
//! These are the reshaped forms of the platform's GraphQL nodes: edges and
//! connection wrappers are stripped, the pinned metafield is flattened to its
//! raw string value, and a product's image connection is reduced to the URL of
//! its first image.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The metafield value that marks a collection as pinned. Compared exactly.
pub const PINNED_VALUE: &str = "true";

/// A product collection fetched from the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Opaque platform ID, e.g. `"gid://shopify/Collection/42"`.
    pub id: String,
    pub title: String,
    /// URL slug, e.g. `"summer-drinks"`.
    pub handle: String,
    pub updated_at: DateTime<Utc>,
    /// Raw value of the pinned metafield, `None` when the metafield is unset.
    pub pinned_value: Option<String>,
}

impl Collection {
    /// Returns `true` only when the pinned metafield value is exactly `"true"`.
    ///
    /// Absent values, `"TRUE"`, `"1"`, `" true"` and anything else count as
    /// not pinned.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned_value.as_deref() == Some(PINNED_VALUE)
    }
}

/// A product listed inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub handle: String,
    /// CDN URL of the product's first image, if it has any.
    pub image_url: Option<String>,
}

/// Position in a paginated list plus whether another page exists.
///
/// A cursor belongs to exactly one list (the collection listing, or one
/// collection's products) and must not be replayed against another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// Opaque end cursor of the last fetched page.
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

impl PageCursor {
    /// Cursor for a list that has no further pages.
    #[must_use]
    pub fn exhausted() -> Self {
        Self::default()
    }

    /// Returns the token to request the next page with, or `None` when the
    /// list is exhausted.
    #[must_use]
    pub fn next_token(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}
