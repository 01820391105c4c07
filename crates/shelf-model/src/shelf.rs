//! Shelves and their owners.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub image: String,
}

/// A named collection of book forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookshelf {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    /// Unix timestamp in seconds.
    #[serde(default)]
    pub last_modified: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub user: User,
}

/// Offset/limit window for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationParams {
    #[must_use]
    pub fn with_limit(limit: u32) -> Self {
        Self {
            offset: None,
            limit: Some(limit),
        }
    }

    /// Query pairs to send. Unset and zero values are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(offset) = self.offset.filter(|&offset| offset > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit.filter(|&limit| limit > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}
