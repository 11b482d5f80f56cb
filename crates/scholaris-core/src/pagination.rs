//! Pagination and list-query types shared by every collection endpoint.
//!
//! All list endpoints accept the same query parameters and answer with the
//! same envelope:
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": {
//!     "currentPage": 2,
//!     "totalPages": 5,
//!     "previousPage": 1,
//!     "nextPage": 3,
//!     "total": 48,
//!     "count": 10
//!   }
//! }
//! ```
//!
//! # Limits
//!
//! - `limit` is clamped to the range [1, 100] (default 10)
//! - `page` is clamped to a minimum of 1 (default 1)
//! - empty `search`/`status` strings are not sent

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub previous_page: Option<u32>,
    #[serde(default)]
    pub next_page: Option<u32>,
    /// Total number of items across all pages
    pub total: u64,
    /// Number of items in this page
    pub count: u32,
}

impl PaginationMeta {
    /// Builds metadata for one page of `count` items out of `total`.
    #[must_use]
    pub fn for_page(page: u32, limit: u32, total: u64, count: u32) -> Self {
        let limit = u64::from(limit.clamp(1, MAX_LIMIT));
        let total_pages = u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX);
        let current_page = page.max(1);
        Self {
            current_page,
            total_pages,
            previous_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < total_pages).then(|| current_page + 1),
            total,
            count,
        }
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }
}

/// A page of results as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    /// A single page holding everything in `data`.
    pub fn single_page(data: Vec<T>) -> Self {
        let count = u32::try_from(data.len()).unwrap_or(u32::MAX);
        let meta = PaginationMeta::for_page(1, MAX_LIMIT, u64::from(count), count);
        Self { data, meta }
    }
}

/// Query parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub academy_id: Option<Uuid>,
    pub status: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn academy(mut self, academy_id: Uuid) -> Self {
        self.academy_id = Some(academy_id);
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns the effective page, clamped to a minimum of 1.
    #[must_use]
    pub fn effective_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Renders the parameters as query pairs, omitting anything unset or blank.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.effective_page().to_string()),
            ("limit".to_string(), self.effective_limit().to_string()),
        ];

        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            query.push(("search".to_string(), search.to_string()));
        }
        if let Some(academy_id) = self.academy_id {
            query.push(("academyId".to_string(), academy_id.to_string()));
        }
        if let Some(status) = self.status.as_deref().map(str::trim)
            && !status.is_empty()
        {
            query.push(("status".to_string(), status.to_string()));
        }
        if let Some(from) = self.from {
            query.push(("from".to_string(), from.to_string()));
        }
        if let Some(to) = self.to {
            query.push(("to".to_string(), to.to_string()));
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams::default();
        assert_eq!(params.effective_page(), 1);
        assert_eq!(params.effective_limit(), 10);
        let query = params.to_query();
        assert_eq!(query.len(), 2);
        assert_eq!(value_of(&query, "page"), Some("1"));
        assert_eq!(value_of(&query, "limit"), Some("10"));
    }

    #[test]
    fn test_list_params_limit_boundary_cases() {
        let test_cases = vec![(Some(1), 1), (Some(50), 50), (Some(100), 100), (Some(101), 100), (Some(0), 1)];

        for (input, expected) in test_cases {
            let params = ListParams {
                limit: input,
                ..Default::default()
            };
            assert_eq!(params.effective_limit(), expected);
        }
    }

    #[test]
    fn test_list_params_page_zero_clamped() {
        let params = ListParams::new().page(0);
        assert_eq!(params.effective_page(), 1);
    }

    #[test]
    fn test_list_params_blank_search_omitted() {
        let query = ListParams::new().search("   ").status("").to_query();
        assert_eq!(value_of(&query, "search"), None);
        assert_eq!(value_of(&query, "status"), None);
    }

    #[test]
    fn test_list_params_full_query() {
        let academy = Uuid::from_u128(7);
        let params = ListParams {
            page: Some(3),
            limit: Some(25),
            search: Some(" math ".into()),
            academy_id: Some(academy),
            status: Some("PENDING".into()),
            from: NaiveDate::from_ymd_opt(2026, 1, 1),
            to: NaiveDate::from_ymd_opt(2026, 2, 1),
        };
        let query = params.to_query();
        assert_eq!(value_of(&query, "page"), Some("3"));
        assert_eq!(value_of(&query, "limit"), Some("25"));
        assert_eq!(value_of(&query, "search"), Some("math"));
        assert_eq!(value_of(&query, "academyId"), Some(academy.to_string().as_str()));
        assert_eq!(value_of(&query, "status"), Some("PENDING"));
        assert_eq!(value_of(&query, "from"), Some("2026-01-01"));
        assert_eq!(value_of(&query, "to"), Some("2026-02-01"));
    }

    #[test]
    fn test_pagination_meta_for_middle_page() {
        let meta = PaginationMeta::for_page(2, 10, 48, 10);
        assert_eq!(meta.total_pages, 5);
        assert_eq!(meta.previous_page, Some(1));
        assert_eq!(meta.next_page, Some(3));
        assert!(meta.has_more());
    }

    #[test]
    fn test_pagination_meta_last_page() {
        let meta = PaginationMeta::for_page(5, 10, 48, 8);
        assert_eq!(meta.next_page, None);
        assert!(!meta.has_more());
    }

    #[test]
    fn test_pagination_meta_zero_total() {
        let meta = PaginationMeta::for_page(1, 10, 0, 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.previous_page, None);
        assert_eq!(meta.next_page, None);
    }

    #[test]
    fn test_pagination_meta_deserialize_camel_case() {
        let json = r#"{"currentPage":1,"totalPages":2,"previousPage":null,"nextPage":2,"total":15,"count":10}"#;
        let meta: PaginationMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta, PaginationMeta::for_page(1, 10, 15, 10));
    }

    #[test]
    fn test_paginated_deserialize() {
        let json = r#"{"data":[1,2,3],"meta":{"currentPage":1,"totalPages":1,"total":3,"count":3}}"#;
        let page: Paginated<u8> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data, vec![1, 2, 3]);
        assert_eq!(page.meta.next_page, None);
    }
}
