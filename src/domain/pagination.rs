use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const VISIBLE_PAGE_BUTTONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based, always within `1..=total_pages`.
    pub page_number: usize,
    pub page_size: usize,
    /// Never below 1; an empty view still has one (empty) page.
    pub total_pages: usize,
    pub start_index: usize,
    /// Exclusive.
    pub end_index: usize,
    pub total_items: usize,
}

impl PageInfo {
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub info: PageInfo,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}

/// Slice one page out of `view`. Out-of-range page numbers are clamped; a
/// `page_size` of 0 is treated as 1.
pub fn paginate<T>(view: &[T], page_size: usize, page_number: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(view.len(), page_size);
    let page_number = clamp_page(page_number, total_pages);
    let start_index = ((page_number - 1) * page_size).min(view.len());
    let end_index = (start_index + page_size).min(view.len());

    Page {
        items: &view[start_index..end_index],
        info: PageInfo {
            page_number,
            page_size,
            total_pages,
            start_index,
            end_index,
            total_items: view.len(),
        },
    }
}

/// Page buttons to show: up to `visible` consecutive numbers, centred on
/// `current` where possible and shifted inward at either end.
pub fn page_window(current: usize, total_pages: usize, visible: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let current = clamp_page(current, total_pages);
    let visible = visible.max(1);

    let mut start = current.saturating_sub(visible / 2).max(1);
    let end = (start + visible - 1).min(total_pages);
    if end + 1 - start < visible {
        start = (end + 1).saturating_sub(visible).max(1);
    }
    (start..=end).collect()
}
