//! Page-number pagination.
//!
//! Lists are cut into fixed pages of [`PAGE_SIZE`] and returned as
//! `{count, next, previous, results}`. `next`/`previous` reuse the request's
//! path and query string with only `page` replaced.

use crate::errors::AppError;
use axum::http::Uri;
use serde::Serialize;
use utoipa::ToSchema;

pub const PAGE_SIZE: u64 = 10;

const INVALID_PAGE: &str = "Invalid page.";

/// A validated page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    /// Parses the raw `page` value; absent means page 1.
    ///
    /// Pages whose offset does not fit a signed 64-bit SQL `OFFSET` can never
    /// hold rows and are rejected here.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let number = match raw.map(str::trim) {
            None | Some("") => 1,
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|n| *n >= 1)
                .filter(|n| {
                    (n - 1)
                        .checked_mul(PAGE_SIZE)
                        .is_some_and(|offset| offset <= i64::MAX as u64)
                })
                .ok_or_else(|| AppError::NotFound(INVALID_PAGE.to_string()))?,
        };

        Ok(Self {
            number,
            size: PAGE_SIZE,
        })
    }

    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.size
    }

    pub fn limit(&self) -> u64 {
        self.size
    }

    /// Number of pages for `count` rows; an empty result still has one page.
    pub fn num_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.size).max(1)
    }

    /// Fails with 404 when this page lies past the end of `count` rows.
    pub fn ensure_within(&self, count: u64) -> Result<(), AppError> {
        if self.number > self.num_pages(count) {
            return Err(AppError::NotFound(INVALID_PAGE.to_string()));
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 1,
            size: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    /// Total number of matching rows across all pages
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, count: u64, request: PageRequest, uri: &Uri) -> Self {
        let next = (request.number < request.num_pages(count))
            .then(|| page_link(uri, Some(request.number + 1)));
        let previous = match request.number {
            1 => None,
            2 => Some(page_link(uri, None)),
            n => Some(page_link(uri, Some(n - 1))),
        };

        Self {
            count,
            next,
            previous,
            results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Rebuilds `uri` with `page` set to `page`, or removed when `None`.
fn page_link(uri: &Uri, page: Option<u64>) -> String {
    let mut pairs: Vec<String> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some("page"))
        .map(str::to_string)
        .collect();

    if let Some(page) = page {
        pairs.push(format!("page={}", page));
    }

    if pairs.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), pairs.join("&"))
    }
}
