//! Fixed-size paging with clamping

/// One page of a list plus enough to render navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Requested page clamped into `1..=total_pages`
    pub page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub fn total_pages(len: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    let pages = len.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Slice `items` into page `page` of `page_size`.
///
/// Out-of-range pages resolve to the nearest valid page: a stale token may
/// point past the end after items were removed. A zero page size is treated
/// as one.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> Page<T> {
    let total_pages = total_pages(items.len(), page_size);
    let page = page.clamp(1, total_pages);
    let size = page_size.max(1) as usize;
    let start = (page as usize - 1).saturating_mul(size);

    let items = items.into_iter().skip(start).take(size).collect();
    Page { items, page, total_pages }
}
