/// CatalogView Pagination
///
/// Page windowing over the sorted rows, plus page-block windowing for the page
/// number controls a renderer shows.
///
/// A page block is a fixed-size run of page numbers. Only the block containing the
/// current page is exposed, so the number of controls stays bounded however many
/// pages there are.
///
/// # Examples
///
/// ```
/// use catalogview::PageBlock;
///
/// // 12 pages, 5 controls per block, currently on page 7 (0-indexed)
/// let block = PageBlock::compute(7, 12, 5);
/// assert_eq!(block.pages(), vec![5, 6, 7, 8, 9]);
/// assert!(block.can_go_to_previous_block);
/// assert!(block.can_go_to_next_block);
/// ```

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Current page position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Pagination { page_index: 0, page_size }
    }

    /// Row range of the current page within `row_count` rows.
    pub fn window(&self, row_count: usize) -> Range<usize> {
        page_window(self.page_index, self.page_size, row_count)
    }

    /// Same position, with the index clamped to the pages `row_count` rows make.
    pub fn clamped(self, row_count: usize) -> Self {
        Pagination {
            page_index: clamp_page_index(self.page_index, self.page_size, row_count),
            ..self
        }
    }
}

/// Number of pages; 0 when there are no rows.
pub fn page_count(row_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    row_count.div_ceil(page_size)
}

/// Clamps a page index into `[0, max(0, page_count - 1)]`.
pub fn clamp_page_index(page_index: usize, page_size: usize, row_count: usize) -> usize {
    let last = page_count(row_count, page_size).saturating_sub(1);
    page_index.min(last)
}

/// Row range `[page_index * page_size, min(row_count, (page_index + 1) * page_size))`.
/// Empty when the page lies past the end.
pub fn page_window(page_index: usize, page_size: usize, row_count: usize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size).min(row_count);
    let end = page_index
        .saturating_add(1)
        .saturating_mul(page_size)
        .min(row_count);
    start..end
}

/// The block of page-number controls around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBlock {
    pub block_index: usize,
    pub block_start: usize,
    pub block_end: usize,
    pub can_go_to_previous_block: bool,
    pub can_go_to_next_block: bool,
}

impl PageBlock {
    /// A block size of 0 is treated as 1. An index past the last page is taken as the
    /// last page.
    pub fn compute(page_index: usize, page_count: usize, block_size: usize) -> Self {
        let block_size = block_size.max(1);
        let page_index = page_index.min(page_count.saturating_sub(1));
        let block_index = page_index / block_size;
        let block_start = block_index * block_size;
        let block_end = block_start.saturating_add(block_size).min(page_count);
        PageBlock {
            block_index,
            block_start,
            block_end,
            can_go_to_previous_block: block_index > 0,
            can_go_to_next_block: block_end < page_count,
        }
    }

    /// 0-indexed page numbers in `[block_start, block_end)`.
    pub fn pages(&self) -> Vec<usize> {
        (self.block_start..self.block_end.max(self.block_start)).collect()
    }
}

/// Footer figures: "Showing {first}-{last} of {total}".
///
/// Row numbers are 1-based; both are 0 when the page is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub first_row_number: usize,
    pub last_row_number: usize,
    pub total_count: usize,
}
