/// Fixed-size pagination over ordered results

use std::num::NonZeroUsize;

use hawkeye_core::Page;

/// Slice `items` into the 1-based page `page_number`.
///
/// Pages past the end (and page 0) are empty views that still report the
/// correct totals.
pub fn paginate<T: Clone>(items: &[T], page_number: usize, page_size: NonZeroUsize) -> Page<T> {
    let size = page_size.get();
    let total_items = items.len();
    let total_pages = total_items.div_ceil(size);

    let page_items = match page_number.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size);
            if start < total_items {
                let end = start.saturating_add(size).min(total_items);
                items[start..end].to_vec()
            } else {
                Vec::new()
            }
        }
        None => Vec::new(),
    };

    Page {
        items: page_items,
        page_number,
        page_size: size,
        total_items,
        total_pages,
    }
}

/// Pager bound to one configured page size
#[derive(Debug, Clone, Copy)]
pub struct ResultPager {
    page_size: NonZeroUsize,
}

impl ResultPager {
    /// `None` for a zero page size
    pub fn new(page_size: usize) -> Option<Self> {
        NonZeroUsize::new(page_size).map(|page_size| Self { page_size })
    }

    pub fn page<T: Clone>(&self, items: &[T], page_number: usize) -> Page<T> {
        paginate(items, page_number, self.page_size)
    }
}
