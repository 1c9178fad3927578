//! Page-number pagination shared by the movie and actor collections.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, FieldErrors, Result};

/// Raw `page` / `page_size` query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Resolve against a collection default and the configured cap. Oversized
    /// page sizes are clamped, zero values are rejected.
    pub fn resolve(self, default_size: u32, max_size: u32) -> Result<PageRequest> {
        let mut errors = FieldErrors::new();
        let page = self.page.unwrap_or(1);
        if page == 0 {
            errors.add("page", "Page numbers start at 1.");
        }
        let page_size = self.page_size.unwrap_or(default_size);
        if page_size == 0 {
            errors.add("page_size", "Page size must be at least 1.");
        }
        errors.into_result()?;

        Ok(PageRequest {
            page,
            page_size: page_size.min(max_size.max(1)),
        })
    }
}

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    /// Last page number for `total` items; an empty collection still has page 1.
    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.page_size)).max(1)
    }
}

/// One window of a collection together with the collection's total size.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}

/// Response body of a paginated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build the response page. `path` is the collection route and `filters`
    /// the active filter pairs carried into the `next` / `previous` links.
    pub fn build(
        paged: Paged<T>,
        request: PageRequest,
        path: &str,
        filters: &[(&str, String)],
    ) -> Result<Self> {
        let last = request.last_page(paged.total);
        let current = u64::from(request.page);
        if current > last {
            return Err(CatalogError::NotFound("Invalid page.".to_string()));
        }

        let link = |page: u64| {
            let mut query = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in filters {
                query.append_pair(key, value);
            }
            query.append_pair("page", &page.to_string());
            query.append_pair("page_size", &request.page_size.to_string());
            format!("{}?{}", path, query.finish())
        };

        Ok(Self {
            count: paged.total,
            next: (current < last).then(|| link(current + 1)),
            previous: (current > 1).then(|| link(current - 1)),
            results: paged.items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_cap_apply() {
        let request = PageParams::default().resolve(10, 1000).unwrap();
        assert_eq!(request, PageRequest { page: 1, page_size: 10 });

        let capped = PageParams {
            page: Some(2),
            page_size: Some(5000),
        }
        .resolve(10, 1000)
        .unwrap();
        assert_eq!(capped.page_size, 1000);
        assert_eq!(capped.offset(), 1000);
    }

    #[test]
    fn zero_values_are_rejected_together() {
        let err = PageParams {
            page: Some(0),
            page_size: Some(0),
        }
        .resolve(10, 1000)
        .unwrap_err();
        let CatalogError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.contains("page"));
        assert!(fields.contains("page_size"));
    }

    #[test]
    fn links_carry_filters() {
        let paged = Paged::new(vec![4, 5], 5);
        let page = Page::build(
            paged,
            PageRequest::new(2, 2),
            "/api/v1/movies",
            &[("genres", "Drama,Comedy".to_string())],
        )
        .unwrap();
        assert_eq!(page.count, 5);
        assert_eq!(
            page.next.as_deref(),
            Some("/api/v1/movies?genres=Drama%2CComedy&page=3&page_size=2")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("/api/v1/movies?genres=Drama%2CComedy&page=1&page_size=2")
        );
    }

    #[test]
    fn page_past_the_end_is_not_found() {
        let paged: Paged<u8> = Paged::new(vec![], 3);
        let err = Page::build(paged, PageRequest::new(3, 2), "/x", &[]).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn empty_first_page_is_valid() {
        let paged: Paged<u8> = Paged::new(vec![], 0);
        let page = Page::build(paged, PageRequest::new(1, 10), "/x", &[]).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.next.is_none() && page.previous.is_none());
    }
}
