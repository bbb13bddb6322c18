//! Wire types for the panel application API.
//!
//! The API wraps every record in an `attributes` envelope and paginates list
//! endpoints with `meta.pagination` metadata.

use serde::{Deserialize, Serialize};

/// Sentinel nest id returned by a dry-run create. Nothing with this id exists
/// on the panel; callers must never issue requests against it.
pub const DRY_RUN_NEST_ID: i64 = -1;

/// Envelope around a single API record.
#[derive(Debug, Deserialize)]
pub struct ApiObject<T> {
    pub attributes: T,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<ApiObject<T>>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { total_pages: 1 }
    }
}

fn default_total_pages() -> u32 {
    1
}

/// A nest record as returned by the panel.
#[derive(Debug, Clone, Deserialize)]
pub struct Nest {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The only egg field the sync reads from listings: the display name used
/// for duplicate detection.
#[derive(Debug, Clone, Deserialize)]
pub struct EggSummary {
    pub name: String,
}

/// Request body for creating a nest.
#[derive(Debug, Serialize)]
pub struct CreateNest<'a> {
    pub name: &'a str,
    pub identifier: String,
    pub description: &'a str,
}
