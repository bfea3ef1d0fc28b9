//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped via `striker_db::clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?hard=true` selects a permanent delete instead of a soft delete.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub hard: bool,
}
