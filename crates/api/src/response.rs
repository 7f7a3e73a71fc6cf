//! Shared response envelope types for API handlers.
//!
//! Entity payloads use a `{ "data": ... }` envelope. Endpoints with a fixed
//! contract shape (checkout receipts, acknowledgements, paginated order
//! lists) return their own structs instead.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "ok": true }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
