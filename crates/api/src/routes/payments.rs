//! Route definitions for payments.
//!
//! Intent creation and the webhook sit behind different rate limits, so they
//! are built as separate routers and merged by the caller.

use axum::routing::post;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// ```text
/// POST   /payments/intent     -> create_intent
/// ```
pub fn intent_router() -> Router<AppState> {
    Router::new().route("/payments/intent", post(payments::create_intent))
}

/// ```text
/// POST   /payments/webhook    -> webhook
/// ```
pub fn webhook_router() -> Router<AppState> {
    Router::new().route("/payments/webhook", post(payments::webhook))
}
