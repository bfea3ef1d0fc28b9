//! Shared response envelope types for API handlers.
//!
//! Resource reads (`/characters`, `/training-catalog`, `/training-log`) use a
//! `{ "data": ... }` envelope. Training lifecycle endpoints return their own
//! shapes, defined next to their handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
