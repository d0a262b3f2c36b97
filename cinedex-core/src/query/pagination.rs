use super::range::clamp;

/// Largest page a listing will return.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Smallest page a listing will return.
pub const MIN_PAGE_SIZE: i64 = 1;

/// Offset pagination derived from untrusted `page` / `page_size` inputs.
///
/// Invariants: `page >= 1`, `page_size` in `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`,
/// `skip == (page - 1) * page_size` (saturating), `limit == page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    page: u64,
    page_size: u64,
    skip: u64,
}

impl Pagination {
    /// Repair raw paging inputs. Never fails.
    ///
    /// A page of zero or below means the first page. A page size above
    /// [`MAX_PAGE_SIZE`] is capped, and one of zero or below is raised to
    /// [`MIN_PAGE_SIZE`].
    pub fn normalize(page: i64, page_size: i64) -> Self {
        let page = page.max(1) as u64;
        let page_size = clamp(page_size, MIN_PAGE_SIZE, MAX_PAGE_SIZE) as u64;
        let skip = (page - 1).saturating_mul(page_size);

        Self {
            page,
            page_size,
            skip,
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    /// Documents discarded before the page starts.
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum documents returned.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::normalize(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_skips_nothing() {
        let p = Pagination::normalize(1, 10);
        assert_eq!((p.skip(), p.limit()), (0, 10));
    }

    #[test]
    fn later_pages_skip_previous_ones() {
        let p = Pagination::normalize(3, 25);
        assert_eq!((p.skip(), p.limit()), (50, 25));
    }

    #[test]
    fn non_positive_page_behaves_like_page_one() {
        let first = Pagination::normalize(1, 20);
        for page in [0, -1, -50, i64::MIN] {
            let p = Pagination::normalize(page, 20);
            assert_eq!(p.skip(), first.skip(), "page {page}");
            assert_eq!(p.page(), 1);
        }
    }

    #[test]
    fn oversized_page_is_capped() {
        for size in [101, 500, i64::MAX] {
            assert_eq!(Pagination::normalize(1, size).limit(), 100);
        }
        assert_eq!(Pagination::normalize(2, 1000).skip(), 100);
    }

    #[test]
    fn non_positive_page_size_is_raised_to_one() {
        for size in [0, -5, i64::MIN] {
            let p = Pagination::normalize(4, size);
            assert_eq!(p.limit(), 1);
            assert_eq!(p.skip(), 3);
        }
    }

    #[test]
    fn huge_pages_saturate_instead_of_overflowing() {
        let p = Pagination::normalize(i64::MAX, 100);
        assert_eq!(p.skip(), u64::MAX);
        assert_eq!(p.limit(), 100);
    }
}
