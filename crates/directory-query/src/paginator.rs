//! Fixed-size pagination over a derived result sequence.

use std::ops::Range;

use directory_model::DEFAULT_PAGE_SIZE;

/// Most page buttons shown before the window collapses with ellipses.
const MAX_VISIBLE_PAGES: usize = 5;

/// Number of pages for `len` items. Always at least one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a 1-based page into `[1, page_count]`.
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(len, page_size))
}

/// Index range of `page` within a sequence of `len` items, after clamping.
pub fn page_range(len: usize, page_size: usize, page: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let page = clamp_page(page, len, page_size);
    let start = ((page - 1) * page_size).min(len);
    let end = (start + page_size).min(len);
    start..end
}

/// Window of at most `page_size` items for `page`, clamped into range.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    &items[page_range(items.len(), page_size, page)]
}

/// Entry in a page navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Page buttons to show for `current` of `total` pages.
///
/// Up to five pages are listed in full. Beyond that the first and last
/// pages are always shown, and the neighbourhood of `current` is kept with
/// ellipses standing in for the gaps.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }
    let mut items = Vec::with_capacity(MAX_VISIBLE_PAGES + 2);
    if current <= 3 {
        items.extend((1..=4).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total));
    } else if current >= total - 2 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((total - 3..=total).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((current - 1..=current + 1).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total));
    }
    items
}

/// Current page plus the fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Set the page without knowing the result count yet.
    ///
    /// Used to restore a saved page before results exist; call
    /// [`Paginator::clamp`] once they do.
    pub fn restore(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Move to `page`, clamped for `len` items. Returns the resulting page.
    pub fn go_to(&mut self, page: usize, len: usize) -> usize {
        self.current_page = clamp_page(page, len, self.page_size);
        self.current_page
    }

    pub fn next(&mut self, len: usize) -> usize {
        self.go_to(self.current_page.saturating_add(1), len)
    }

    pub fn prev(&mut self, len: usize) -> usize {
        self.go_to(self.current_page.saturating_sub(1), len)
    }

    /// Back to the first page. Returns whether the page changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.current_page != 1;
        self.current_page = 1;
        changed
    }

    /// Pull the current page back into range for `len` items. Returns
    /// whether it moved.
    pub fn clamp(&mut self, len: usize) -> bool {
        let clamped = clamp_page(self.current_page, len, self.page_size);
        let changed = clamped != self.current_page;
        self.current_page = clamped;
        changed
    }

    pub fn page_count(&self, len: usize) -> usize {
        page_count(len, self.page_size)
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.current_page < self.page_count(len)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Index range shown for `len` items.
    pub fn range(&self, len: usize) -> Range<usize> {
        page_range(len, self.page_size, self.current_page)
    }

    /// The visible window of `items`.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page_size, self.current_page)
    }

    pub fn page_numbers(&self, len: usize) -> Vec<PageItem> {
        page_numbers(self.current_page, self.page_count(len))
    }
}
