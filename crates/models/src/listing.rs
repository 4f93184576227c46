use serde::Serialize;

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("page numbers start at 1")]
    ZeroPage,
    #[error("per_page must be between 1 and {MAX_PER_PAGE}, got {0}")]
    InvalidPageSize(u64),
}

/// A 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Result<Self, ListingError> {
        if page == 0 {
            return Err(ListingError::ZeroPage);
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(ListingError::InvalidPageSize(per_page));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of rows before this page, saturating for absurdly large pages
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(request.per_page);

        Self {
            page: request.page,
            per_page: request.per_page,
            total_pages,
            total_items,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Slices an in-memory list. Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_items = items.len() as u64;
    let items = items
        .into_iter()
        .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
        .take(request.per_page as usize)
        .collect();

    Page {
        items,
        pagination: PaginationMeta::new(request, total_items),
    }
}

/// Rows that can be matched against a free-text search term
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match on any field
    fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A search term plus any number of field-equality filters, all of which must match
pub struct ListFilter<T> {
    search: Option<String>,
    predicates: Vec<Predicate<T>>,
}

impl<T: Searchable> ListFilter<T> {
    pub fn new() -> Self {
        Self {
            search: None,
            predicates: Vec::new(),
        }
    }

    /// Blank terms are ignored
    pub fn search(mut self, term: Option<String>) -> Self {
        self.search = term.filter(|t| !t.trim().is_empty());
        self
    }

    /// Keeps rows where `field(row) == value`. `None` leaves the filter cleared.
    pub fn field_eq<V>(mut self, value: Option<V>, field: fn(&T) -> V) -> Self
    where
        V: PartialEq + Send + Sync + 'static,
        T: 'static,
    {
        if let Some(value) = value {
            self.predicates.push(Box::new(move |row| field(row) == value));
        }
        self
    }

    pub fn matches(&self, row: &T) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|term| row.matches_search(term));

        search_ok && self.predicates.iter().all(|predicate| predicate(row))
    }

    pub fn apply(&self, rows: Vec<T>) -> Vec<T> {
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

impl<T: Searchable> Default for ListFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        status: &'static str,
        region: &'static str,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Grand Hall", status: "PENDING", region: "Lekki" },
            Row { name: "Harbour View", status: "BOOKED", region: "Ikoyi" },
            Row { name: "Grand Terrace", status: "BOOKED", region: "Lekki" },
            Row { name: "Palm Court", status: "CANCELLED", region: "Lekki" },
        ]
    }

    #[test]
    fn test_page_request_validation() {
        assert_eq!(PageRequest::new(0, 10), Err(ListingError::ZeroPage));
        assert_eq!(
            PageRequest::new(1, 0),
            Err(ListingError::InvalidPageSize(0))
        );
        assert_eq!(
            PageRequest::new(1, 101),
            Err(ListingError::InvalidPageSize(101))
        );
        assert_eq!(PageRequest::new(3, 7).unwrap().offset(), 14);
    }

    #[test]
    fn test_last_page_holds_remainder() {
        let items: Vec<u32> = (1..=23).collect();
        let page = paginate(items, PageRequest::new(3, 10).unwrap());

        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.total_items, 23);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(5, 7).unwrap());
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_huge_page_is_empty() {
        let request = PageRequest::new(u64::MAX, MAX_PER_PAGE).unwrap();
        assert_eq!(request.offset(), u64::MAX);

        let page = paginate(vec![1, 2, 3], request);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.page, u64::MAX);
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn test_empty_list_has_no_pages() {
        let page = paginate(Vec::<u8>::new(), PageRequest::default());
        assert_eq!(page.pagination.total_pages, 0);
        assert!(!page.pagination.has_next);
        assert!(!page.pagination.has_prev);
    }

    #[test]
    fn test_single_field_filter() {
        let filtered = ListFilter::<Row>::new()
            .field_eq(Some("BOOKED"), |row: &Row| row.status)
            .apply(rows());

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|row| row.status == "BOOKED"));
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let filtered = ListFilter::<Row>::new()
            .field_eq(Some("BOOKED"), |row: &Row| row.status)
            .field_eq(Some("Lekki"), |row: &Row| row.region)
            .apply(rows());

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Grand Terrace");
    }

    #[test]
    fn test_clearing_filter_keeps_search() {
        let searched = ListFilter::<Row>::new()
            .search(Some("grand".to_string()))
            .apply(rows());
        let cleared = ListFilter::<Row>::new()
            .search(Some("grand".to_string()))
            .field_eq(None, |row: &Row| row.status)
            .apply(rows());

        assert_eq!(searched.len(), 2);
        assert_eq!(cleared, searched);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filtered = ListFilter::<Row>::new()
            .search(Some("   ".to_string()))
            .apply(rows());
        assert_eq!(filtered.len(), 4);
    }

    proptest! {
        #[test]
        fn prop_pages_partition_the_list(total in 0usize..200, per_page in 1u64..=20) {
            let items: Vec<usize> = (0..total).collect();
            let first = PageRequest::new(1, per_page).unwrap();
            let total_pages = paginate(items.clone(), first).pagination.total_pages;
            prop_assert_eq!(total_pages, (total as u64).div_ceil(per_page));

            let mut seen = Vec::new();
            for page in 1..=total_pages {
                let chunk = paginate(items.clone(), PageRequest::new(page, per_page).unwrap());
                if page < total_pages {
                    prop_assert_eq!(chunk.items.len() as u64, per_page);
                } else {
                    let remainder = total as u64 - (total_pages - 1) * per_page;
                    prop_assert_eq!(chunk.items.len() as u64, remainder);
                }
                seen.extend(chunk.items);
            }
            prop_assert_eq!(seen, items);
        }
    }
}
