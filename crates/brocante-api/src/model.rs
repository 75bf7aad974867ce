//! Common API models and constants
//!
//! This module defines shared constants, data structures, and enums
//! used across the HTTP surface.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

// Pagination defaults
pub const DEFAULT_PAGE_NO: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Free-text queries shorter than this are ignored by the search layer.
/// Matches the autocomplete threshold used by the web client.
pub const MIN_FREE_TEXT_LEN: usize = 2;

/// Prefix for per-attribute filter query parameters (`attr.<id>=<value>`)
pub const ATTRIBUTE_FILTER_PREFIX: &str = "attr.";

/// Generic pagination wrapper for API responses
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub page_number: u64,
    pub pages_available: u64,
    pub page_items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            page_number: 1,
            pages_available: 0,
            page_items: vec![],
        }
    }
}

impl<T> Page<T> {
    pub fn new(total_count: u64, page_number: u64, page_size: u64, page_items: Vec<T>) -> Self {
        Self {
            total_count,
            page_number,
            pages_available: if page_size > 0 {
                (total_count as f64 / page_size as f64).ceil() as u64
            } else {
                0
            },
            page_items,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Sort orders accepted by the listing search endpoint
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Recent,
    Oldest,
    PriceAsc,
    PriceDesc,
    Popularity,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Recent => "recent",
            SortOrder::Oldest => "oldest",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::Popularity => "popularity",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(SortOrder::Recent),
            "oldest" => Ok(SortOrder::Oldest),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            "popularity" => Ok(SortOrder::Popularity),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new_computes_pages_available() {
        let page = Page::new(45, 2, 20, vec![1, 2, 3]);
        assert_eq!(page.total_count, 45);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.pages_available, 3);
    }

    #[test]
    fn test_page_zero_size() {
        let page: Page<i32> = Page::new(45, 1, 0, vec![]);
        assert_eq!(page.pages_available, 0);
    }

    #[test]
    fn test_sort_order_round_trip() {
        assert_eq!(SortOrder::default(), SortOrder::Recent);
        assert_eq!("price-desc".parse::<SortOrder>().unwrap(), SortOrder::PriceDesc);
        assert_eq!(SortOrder::Popularity.as_str(), "popularity");
        assert!("rating".parse::<SortOrder>().is_err());
    }
}
