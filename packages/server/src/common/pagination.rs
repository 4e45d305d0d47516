//! Offset pagination types
//!
//! The dashboard speaks Spring-style paging: a zero-based `page`, a `size`, an
//! optional `sort` property and a `direction`. Responses carry the page content
//! plus totals so the client can render page controls.
//!
//! # Usage
//!
//! ```rust,ignore
//! // In an axum handler
//! let request = params.validate();
//!
//! // In model
//! let order_by = request.order_by(MEMBER_SORT_COLUMNS, "m.id");
//! let (rows, total) = Member::find_page(&request, pool).await?;
//!
//! // Build response
//! let page = Page::new(rows, total, &request);
//! ```

use serde::{Deserialize, Serialize};

/// Default page size when the client sends none (or an invalid one).
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on page size to keep a single request bounded.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Highest page number accepted, so `page * size` and `page + 1` cannot overflow.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE - 1;

// ============================================================================
// Sort direction
// ============================================================================

/// Sort direction, parsed case-insensitively from `asc` / `desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// ============================================================================
// Request
// ============================================================================

/// Raw paging query parameters as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl PageParams {
    /// Clamp values into a usable request.
    ///
    /// Negative pages become page 0 and pages past [`MAX_PAGE`] are capped; missing or non-positive sizes use
    /// [`DEFAULT_PAGE_SIZE`]; sizes are capped at [`MAX_PAGE_SIZE`].
    pub fn validate(&self) -> PageRequest {
        let page = self.page.unwrap_or(0).clamp(0, MAX_PAGE);
        let size = match self.size {
            Some(s) if s > 0 => s.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        PageRequest {
            page,
            size,
            sort: self
                .sort
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            direction: SortDirection::parse(self.direction.as_deref()),
        }
    }
}

/// Validated paging request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Option<String>,
    pub direction: SortDirection,
}

impl PageRequest {
    /// First page of the given size, unsorted.
    pub fn of(page: i64, size: i64) -> Self {
        PageParams {
            page: Some(page),
            size: Some(size),
            sort: None,
            direction: None,
        }
        .validate()
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        self.page * self.size
    }

    /// Build an `ORDER BY` body from a whitelist of `(property, column)` pairs.
    ///
    /// Only whitelisted columns are ever interpolated into SQL. Unknown or
    /// missing sort properties fall back to `default_column`.
    pub fn order_by(&self, allowed: &[(&str, &str)], default_column: &str) -> String {
        let column = self
            .sort
            .as_deref()
            .and_then(|sort| {
                allowed
                    .iter()
                    .find(|(property, _)| property.eq_ignore_ascii_case(sort))
                    .map(|(_, column)| *column)
            })
            .unwrap_or(default_column);

        format!("{} {}", column, self.direction.as_sql())
    }
}

// ============================================================================
// Response
// ============================================================================

/// One page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    /// Zero-based page number.
    pub number: i64,
    pub size: i64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: i64, request: &PageRequest) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };

        Page {
            number_of_elements: content.len(),
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
            first: request.page == 0,
            last: request.page + 1 >= total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[(&str, &str)] = &[("id", "m.id"), ("name", "p.name")];

    #[test]
    fn defaults_when_nothing_sent() {
        let request = PageParams::default().validate();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.direction, SortDirection::Asc);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let request = PageParams {
            page: Some(-3),
            size: Some(10_000),
            ..Default::default()
        }
        .validate();

        assert_eq!(request.page, 0);
        assert_eq!(request.size, MAX_PAGE_SIZE);

        let request = PageParams {
            size: Some(0),
            ..Default::default()
        }
        .validate();
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn huge_page_is_capped_without_overflow() {
        let request = PageParams {
            page: Some(i64::MAX / 2),
            size: Some(10),
            ..Default::default()
        }
        .validate();

        assert_eq!(request.page, MAX_PAGE);
        assert_eq!(request.offset(), MAX_PAGE * 10);

        let page: Page<i32> = Page::new(vec![], 3, &request);
        assert!(page.last);

        let largest = PageParams {
            page: Some(i64::MAX),
            size: Some(MAX_PAGE_SIZE),
            ..Default::default()
        }
        .validate();
        assert!(largest.offset() > 0);
    }

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(PageRequest::of(3, 20).offset(), 60);
    }

    #[test]
    fn order_by_uses_whitelisted_column() {
        let request = PageParams {
            sort: Some("NAME".to_string()),
            direction: Some("desc".to_string()),
            ..Default::default()
        }
        .validate();

        assert_eq!(request.order_by(COLUMNS, "m.id"), "p.name DESC");
    }

    #[test]
    fn order_by_falls_back_for_unknown_column() {
        let request = PageParams {
            sort: Some("name; DROP TABLE members".to_string()),
            ..Default::default()
        }
        .validate();

        assert_eq!(request.order_by(COLUMNS, "m.id"), "m.id ASC");
    }

    #[test]
    fn page_totals() {
        let request = PageRequest::of(1, 10);
        let page = Page::new(vec![1, 2, 3], 13, &request);

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.number_of_elements, 3);
        assert!(!page.first);
        assert!(page.last);
    }

    #[test]
    fn empty_page() {
        let page: Page<i32> = Page::new(vec![], 0, &PageRequest::of(0, 10));
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
    }
}
