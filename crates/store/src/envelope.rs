// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON envelope shapes of the external persistence contract.

use serde::{Deserialize, Serialize};

/// The response envelope wrapping a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The payload.
    pub data: T,
    /// Optional human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

}

/// Pagination metadata for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total: u64,
}

/// A paginated collection of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub pagination: Pagination,
}

impl<T> Collection<T> {
    /// Builds one page from a fully materialized item list.
    ///
    /// `page` is 1-based; a `limit` of zero yields an empty page.
    #[must_use]
    pub fn paginate(all: Vec<T>, page: u64, limit: u64) -> Self {
        let total = all.len() as u64;
        let start = page.saturating_sub(1).saturating_mul(limit);
        let items: Vec<T> = all
            .into_iter()
            .skip(usize::try_from(start).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();
        Self {
            items,
            pagination: Pagination { page, limit, total },
        }
    }
}
