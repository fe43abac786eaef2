use crate::PageMeta;

/// Pager for the post feed. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u32,
}

/// Uses the reported page count when there is one, otherwise derives it from
/// the total item count.
pub fn total_pages(meta: &PageMeta, page_size: u32) -> u32 {
    if let Some(pages) = meta.total_pages.filter(|&p| p > 0) {
        return pages;
    }
    let count = meta.total_count.unwrap_or(0);
    let size = u64::from(page_size.max(1));
    count.div_ceil(size) as u32
}

impl Pager {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self { page, total_pages }
    }

    pub fn from_meta(page: u32, meta: &PageMeta, page_size: u32) -> Self {
        Self::new(page, total_pages(meta, page_size))
    }

    pub fn prev_disabled(&self) -> bool {
        self.page <= 1
    }

    pub fn next_disabled(&self) -> bool {
        self.page >= self.total_pages
    }

    pub fn prev_page(&self) -> Option<u32> {
        (!self.prev_disabled()).then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        (!self.next_disabled()).then(|| self.page + 1)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(total_pages: Option<u32>, total_count: Option<u64>) -> PageMeta {
        PageMeta {
            total_pages,
            total_count,
            ..PageMeta::default()
        }
    }

    #[test]
    fn reported_page_count_wins() {
        assert_eq!(total_pages(&meta(Some(3), Some(100)), 12), 3);
    }

    #[test]
    fn page_count_derived_from_total() {
        assert_eq!(total_pages(&meta(None, Some(25)), 12), 3);
        assert_eq!(total_pages(&meta(None, Some(24)), 12), 2);
        assert_eq!(total_pages(&meta(Some(0), Some(1)), 12), 1);
        assert_eq!(total_pages(&meta(None, None), 12), 0);
    }

    #[test]
    fn first_page_disables_previous() {
        let pager = Pager::new(1, 5);
        assert!(pager.prev_disabled());
        assert!(!pager.next_disabled());
        assert_eq!(pager.prev_page(), None);
        assert_eq!(pager.next_page(), Some(2));
    }

    #[test]
    fn last_page_disables_next() {
        let pager = Pager::from_meta(3, &meta(None, Some(30)), 12);
        assert_eq!(pager.total_pages, 3);
        assert!(pager.next_disabled());
        assert!(!pager.prev_disabled());
        assert_eq!(pager.label(), "Page 3 of 3");
    }

    #[test]
    fn single_page_disables_both() {
        let pager = Pager::new(1, 1);
        assert!(pager.prev_disabled() && pager.next_disabled());
    }
}
