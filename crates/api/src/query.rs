//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-number pagination used by the order list
/// (`?page=&pageSize=&status=&sort=field:dir`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub status: Option<String>,
    pub sort: Option<String>,
}
