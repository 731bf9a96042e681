//! Cursor-based pagination over GraphQL connections.
//!
//! Every connection page carries `pageInfo { hasNextPage endCursor }`. The
//! next page is requested by passing `endCursor` back as `after:`. A page
//! that claims more results but omits its end cursor cannot be continued and
//! is treated as a malformed response rather than as the last page.

use smartgrid_core::PageCursor;

use crate::error::BrowserError;
use crate::types::PageInfo;

/// Maximum number of pages an exhaustive listing will follow before giving up.
/// Guards against cursors that cycle.
pub const MAX_PAGES: usize = 500;

/// Returns the `after:` token for the page following `page_info`, or `None`
/// on the last page.
///
/// # Errors
///
/// Returns [`BrowserError::MalformedResponse`] when `hasNextPage` is `true`
/// but `endCursor` is null or empty.
pub fn next_page_token(
    page_info: &PageInfo,
    operation: &'static str,
) -> Result<Option<String>, BrowserError> {
    if !page_info.has_next_page {
        return Ok(None);
    }
    match page_info.end_cursor.as_deref() {
        Some(cursor) if !cursor.is_empty() => Ok(Some(cursor.to_owned())),
        _ => Err(BrowserError::malformed(
            operation,
            "pageInfo.hasNextPage is true but endCursor is missing",
        )),
    }
}

/// Converts `page_info` into a [`PageCursor`], applying the same validation as
/// [`next_page_token`].
///
/// # Errors
///
/// See [`next_page_token`].
pub fn checked_cursor(
    page_info: PageInfo,
    operation: &'static str,
) -> Result<PageCursor, BrowserError> {
    next_page_token(&page_info, operation)?;
    Ok(PageCursor::from(page_info))
}
