//! Page-number pagination types for the listing query surface.
//!
//! Pages are 1-indexed. Requesting a page beyond the last one is not an
//! error: the result degrades to an empty data array with accurate totals,
//! so clients can always trust `meta` regardless of the page they asked for.

use serde::{Deserialize, Serialize};

/// Requested page window, normalized before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    pub page: u32,
    pub page_size: u32,
}

impl PageParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Clamp out-of-domain inputs: page and page_size are both at least 1.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.max(1),
        }
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

/// Pagination metadata returned alongside every page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

/// A page of results plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Slice `items` down to the requested window.
    ///
    /// `items` must already be filtered and sorted; this only windows it.
    pub fn from_items(items: Vec<T>, params: PageParams) -> Self {
        let params = params.normalized();
        let total_items = items.len() as u64;
        let total_pages = total_items.div_ceil(params.page_size as u64) as u32;

        let offset = (params.page as usize - 1).saturating_mul(params.page_size as usize);
        let data: Vec<T> = items
            .into_iter()
            .skip(offset)
            .take(params.page_size as usize)
            .collect();

        Page {
            data,
            meta: PageMeta {
                current_page: params.page,
                total_pages,
                total_items,
                items_per_page: params.page_size,
            },
        }
    }
}
