//! Page/limit handling for list endpoints.

use serde::Serialize;

use crate::config::ApiConfig;

pub const DEFAULT_PAGE: i64 = 1;

/// A resolved page request. `page >= 1` and `1 <= limit <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Resolve raw query values. Each value is parsed leniently (leading
    /// integer, like `"3abc"` -> 3); anything unparseable falls back to the
    /// default.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, api: &ApiConfig) -> Self {
        let page = page.and_then(parse_int_prefix).unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(parse_int_prefix)
            .unwrap_or(api.default_page_limit);

        Self {
            page: page.max(1),
            limit: limit.clamp(1, api.max_page_limit.max(1)),
        }
    }

    /// Number of items before this page.
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination metadata returned alongside a page of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_posts: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub limit: i64,
}

impl PageMeta {
    pub fn new(total_posts: i64, request: &PageRequest) -> Self {
        Self {
            total_posts,
            current_page: request.page,
            total_pages: (total_posts + request.limit - 1) / request.limit,
            limit: request.limit,
        }
    }
}

/// Parse the leading base-10 integer of `raw`, ignoring leading whitespace
/// and anything after the digits. Values too large for `i64` saturate.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // All digits, so a parse failure can only be overflow.
    let magnitude: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
