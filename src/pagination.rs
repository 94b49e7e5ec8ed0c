use std::fmt;
use std::str::FromStr;

use crate::error::CookbookError;

/// Page sizes the user may pick from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::Fifty,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = CookbookError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| {
                CookbookError::InvalidInput(format!(
                    "Page size must be one of 5, 10, 20 or 50 (got {})",
                    value
                ))
            })
    }
}

impl FromStr for PageSize {
    type Err = CookbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|_| CookbookError::InvalidInput(format!("Invalid page size: {}", s)))?;
        PageSize::try_from(value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Number of pages needed for `total` items, at least one
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Slice out a 1-based page. Pages past the end are empty and page 0 is
/// read as page 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Current page and page size of a result list.
///
/// The page always points at a page that exists for the latest total seen
/// by [`Pagination::sync`]; it returns to 1 when the page size changes or the
/// criteria are reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: PageSize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(PageSize::default())
    }
}

impl Pagination {
    pub fn new(page_size: PageSize) -> Self {
        Pagination { page: 1, page_size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Move to `page`, clamped to the pages available for `total` items
    pub fn set_page(&mut self, page: usize, total: usize) {
        let last = page_count(total, self.page_size.get());
        self.page = page.clamp(1, last);
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Back to the first page, used whenever the criteria change
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Re-validate against a new total; returns true when the page moved
    pub fn sync(&mut self, total: usize) -> bool {
        if self.page > page_count(total, self.page_size.get()) {
            self.page = 1;
            return true;
        }
        false
    }

    pub fn total_pages(&self, total: usize) -> usize {
        page_count(total, self.page_size.get())
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page, self.page_size.get())
    }
}
