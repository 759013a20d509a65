use tracing::debug;

use crate::error::PageSizeError;

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Which page to fetch. `page_index` is zero-based; the wire uses 1-based pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    pub page_index: usize,
    pub page_size: usize,
}

impl FetchRequest {
    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("page", (self.page_index + 1).to_string()),
            ("limit", self.page_size.to_string()),
        ]
    }
}

/// Current page index and page size, plus the remote total from the last load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page_index: usize,
    page_size: usize,
    total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    pub fn request(&self) -> FetchRequest {
        FetchRequest {
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }

    /// Number of pages; at least 1 so page 0 always exists.
    pub fn page_count(&self) -> usize {
        let size = self.page_size as u64;
        (self.total.div_ceil(size) as usize).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        if !self.has_next() {
            return None;
        }
        self.go_to(self.page_index + 1)
    }

    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        if !self.has_prev() {
            return None;
        }
        self.go_to(self.page_index - 1)
    }

    pub fn first_page(&mut self) -> Option<FetchRequest> {
        self.go_to(0)
    }

    pub fn last_page(&mut self) -> Option<FetchRequest> {
        self.go_to(self.page_count() - 1)
    }

    /// Moves to `index`. Returns `None` when out of range or already there.
    pub fn go_to(&mut self, index: usize) -> Option<FetchRequest> {
        if index >= self.page_count() || index == self.page_index {
            return None;
        }
        debug!(from = self.page_index, to = index, "page change");
        self.page_index = index;
        Some(self.request())
    }

    /// Sets the page size and jumps back to the first page. Always re-fetches.
    pub fn set_page_size(&mut self, page_size: usize) -> FetchRequest {
        debug!(from = self.page_size, to = page_size, "page size change");
        self.page_size = page_size.max(1);
        self.page_index = 0;
        self.request()
    }

    /// 1-based inclusive record range of the current page, `None` when empty.
    pub fn range(&self, shown: usize) -> Option<(u64, u64)> {
        if shown == 0 {
            return None;
        }
        let first = (self.page_index * self.page_size) as u64 + 1;
        Some((first, first + shown as u64 - 1))
    }
}

/// Parses the free-text "rows per page" entry.
pub fn parse_page_size(input: &str) -> Result<usize, PageSizeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PageSizeError::Empty);
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).map_err(|_| PageSizeError::NotANumber(trimmed.into())),
        Ok(_) => Err(PageSizeError::NotPositive),
        Err(_) => Err(PageSizeError::NotANumber(trimmed.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("12", Ok(12) ; "plain")]
    #[test_case("  7 ", Ok(7) ; "surrounding whitespace")]
    #[test_case("+3", Ok(3) ; "explicit plus")]
    #[test_case("", Err(PageSizeError::Empty) ; "empty")]
    #[test_case("   ", Err(PageSizeError::Empty) ; "blank")]
    #[test_case("0", Err(PageSizeError::NotPositive) ; "zero")]
    #[test_case("-4", Err(PageSizeError::NotPositive) ; "negative")]
    #[test_case("abc", Err(PageSizeError::NotANumber("abc".into())) ; "letters")]
    #[test_case("12abc", Err(PageSizeError::NotANumber("12abc".into())) ; "trailing garbage")]
    #[test_case("2.5", Err(PageSizeError::NotANumber("2.5".into())) ; "fraction")]
    fn test_parse_page_size(input: &str, expected: Result<usize, PageSizeError>) {
        assert_eq!(parse_page_size(input), expected);
    }

    #[test]
    fn test_request_query_is_one_based() {
        let request = FetchRequest {
            page_index: 0,
            page_size: 12,
        };
        assert_eq!(
            request.query(),
            [("page", "1".to_string()), ("limit", "12".to_string())]
        );
    }

    #[test]
    fn test_page_count() {
        let mut pagination = Pagination::new(12);
        assert_eq!(pagination.page_count(), 1);

        pagination.set_total(24);
        assert_eq!(pagination.page_count(), 2);

        pagination.set_total(25);
        assert_eq!(pagination.page_count(), 3);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut pagination = Pagination::new(10);
        assert_eq!(pagination.next_page(), None);

        pagination.set_total(25);
        assert_eq!(pagination.prev_page(), None);
        assert_eq!(pagination.next_page().map(|r| r.page_index), Some(1));
        assert_eq!(pagination.next_page().map(|r| r.page_index), Some(2));
        assert_eq!(pagination.next_page(), None);
        assert_eq!(pagination.first_page().map(|r| r.page_index), Some(0));
        assert_eq!(pagination.first_page(), None);
        assert_eq!(pagination.last_page().map(|r| r.page_index), Some(2));
    }

    #[test]
    fn test_set_page_size_resets_index() {
        let mut pagination = Pagination::new(10);
        pagination.set_total(100);
        pagination.go_to(4);

        let request = pagination.set_page_size(25);
        assert_eq!(
            request,
            FetchRequest {
                page_index: 0,
                page_size: 25
            }
        );
        assert_eq!(pagination.page_count(), 4);
    }

    #[test]
    fn test_range() {
        let mut pagination = Pagination::new(12);
        pagination.set_total(30);
        assert_eq!(pagination.range(12), Some((1, 12)));
        pagination.go_to(2);
        assert_eq!(pagination.range(6), Some((25, 30)));
        assert_eq!(pagination.range(0), None);
    }
}
