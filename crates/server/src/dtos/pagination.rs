use crate::error::ApiError;
use models::listing::{DEFAULT_PER_PAGE, Page, PageRequest, PaginationMeta};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PaginationMeta> for PaginationResponse {
    fn from(meta: PaginationMeta) -> Self {
        Self {
            page: meta.page,
            per_page: meta.per_page,
            total_pages: meta.total_pages,
            total_items: meta.total_items,
            has_next: meta.has_next,
            has_prev: meta.has_prev,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationResponse,
}

impl<M, T: From<M>> From<Page<M>> for Paginated<T> {
    fn from(page: Page<M>) -> Self {
        Self {
            items: page.items.into_iter().map(T::from).collect(),
            pagination: page.pagination.into(),
        }
    }
}

/// Builds a page request from optional `page` / `perPage` query parameters
pub fn page_request(page: Option<u64>, per_page: Option<u64>) -> Result<PageRequest, ApiError> {
    Ok(PageRequest::new(
        page.unwrap_or(1),
        per_page.unwrap_or(DEFAULT_PER_PAGE),
    )?)
}
