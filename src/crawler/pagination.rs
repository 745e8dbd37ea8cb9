//! Listing pagination

use crate::document::Document;
use crate::url::first_number;
use crate::ExtractError;

/// Number of listing pages a bucket spans
///
/// Looks at every link whose target mentions `page`; the last one in document
/// order is taken as the highest page and the first digit run of its target is
/// the page count. No such links means a single page, and a link numbered
/// `0` still counts as one page.
pub fn count_pages(document: &Document) -> Result<u32, ExtractError> {
    let links = document.links_containing("page");
    let Some(last) = links.last() else {
        return Ok(1);
    };

    let href = last.value().attr("href").unwrap_or_default();
    first_number(href)
        .map(|pages| pages.max(1))
        .ok_or_else(|| ExtractError::PageNumber {
            href: href.to_string(),
        })
}
