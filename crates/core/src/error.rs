//! Domain errors shared by every crate in the workspace.

use crate::types::DbId;

/// A failed domain operation. The API layer renders each variant as a
/// problem document with a fixed status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 404. Also used for rows that exist in another tenant.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// 400. Input that parsed but breaks a domain rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 409. The target changed state underneath the caller.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 401. The message is logged, never returned.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403. The message is logged, never returned.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
