//! Handlers for the stub payment flow: intent creation and the provider
//! webhook.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use platter_core::audit::{action_types, entity_types};
use platter_core::error::CoreError;
use platter_core::order_status::{OrderStatus, PaymentStatus};
use platter_core::payments::{
    generate_client_secret, verify_webhook_signature, WebhookEvent, EVENT_PAYMENT_SUCCEEDED,
};
use platter_core::types::DbId;
use platter_db::repositories::{OrderRepo, PaymentIntentRepo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::audit::AuditEntry;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::TenantUser;
use crate::state::AppState;

/// Header carrying the webhook HMAC.
pub const SIGNATURE_HEADER: &str = "x-signature";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub order_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct IntentCreated {
    pub client_secret: String,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/payments/intent
///
/// Rate limited per tenant by `intentsPerMin`.
pub async fn create_intent(
    State(state): State<AppState>,
    ctx: TenantUser,
    AppJson(input): AppJson<CreateIntentRequest>,
) -> AppResult<(StatusCode, Json<IntentCreated>)> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: input.order_id,
        })
    };

    let order = OrderRepo::find_by_id(&state.pool, ctx.tenant.id, input.order_id)
        .await?
        .ok_or_else(not_found)?;

    let is_owner = order.user_id == ctx.user.user_id;
    if !is_owner && !ctx.user.is_platform_admin() {
        return Err(not_found());
    }

    if order.payment_status == PaymentStatus::Paid.as_str() {
        return Err(AppError::BadRequest("order is already paid".into()));
    }
    if order.status == OrderStatus::Cancelled.as_str() {
        return Err(AppError::BadRequest("order is cancelled".into()));
    }

    let client_secret = generate_client_secret(order.id);
    let intent = PaymentIntentRepo::create(
        &state.pool,
        ctx.tenant.id,
        order.id,
        &client_secret,
        order.total,
        &order.currency_code,
    )
    .await?;

    tracing::info!(
        tenant_id = %ctx.tenant.id,
        order_id = %order.id,
        intent_id = %intent.id,
        amount = %intent.amount,
        currency = %intent.currency_code,
        "Payment intent created"
    );

    state
        .audit
        .record(
            AuditEntry::new(entity_types::PAYMENT_INTENT, action_types::PAYMENT_INTENT_CREATE)
                .tenant(ctx.tenant.id)
                .actor(ctx.user.user_id)
                .entity(intent.id)
                .summary(json!({
                    "order_id": order.id,
                    "amount": intent.amount,
                    "currency_code": intent.currency_code,
                    "client_secret": client_secret,
                })),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(IntentCreated {
            client_secret,
            amount: intent.amount,
            currency: intent.currency_code,
        }),
    ))
}

/// POST /api/payments/webhook
///
/// Authenticated by `X-Signature` over the raw body. Once the signature is
/// verified every delivery is acknowledged, including unknown event types
/// and processing failures.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !verify_webhook_signature(&state.config.webhook_secret, &body, signature) {
        tracing::warn!("Webhook rejected: bad signature");
        return Err(AppError::Core(CoreError::Unauthorized(
            "invalid webhook signature".into(),
        )));
    }

    let ack = Json(WebhookAck { received: true });

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Webhook body is not a valid event");
            return Ok(ack);
        }
    };

    if event.event_type != EVENT_PAYMENT_SUCCEEDED {
        tracing::debug!(event_type = %event.event_type, "Ignoring webhook event");
        return Ok(ack);
    }

    let Some(order_id) = event.data.order_id else {
        tracing::warn!("payment.succeeded without order_id");
        return Ok(ack);
    };

    if let Err(e) = apply_payment_succeeded(&state, order_id).await {
        tracing::error!(order_id = %order_id, error = %e, "Failed to apply payment.succeeded");
    }

    Ok(ack)
}

async fn apply_payment_succeeded(state: &AppState, order_id: DbId) -> Result<(), sqlx::Error> {
    let Some(order) = OrderRepo::mark_paid(&state.pool, order_id).await? else {
        tracing::warn!(order_id = %order_id, "payment.succeeded for unknown order");
        return Ok(());
    };
    let intents = PaymentIntentRepo::mark_succeeded_for_order(&state.pool, order_id).await?;

    tracing::info!(
        tenant_id = %order.tenant_id,
        order_id = %order.id,
        status = %order.status,
        intents_updated = intents,
        "Payment succeeded"
    );

    state
        .audit
        .record(
            AuditEntry::new(entity_types::ORDER, action_types::PAYMENT_SUCCEEDED)
                .tenant(order.tenant_id)
                .entity(order.id)
                .summary(json!({
                    "status": order.status,
                    "payment_status": order.payment_status,
                    "intents_updated": intents,
                })),
        )
        .await;

    Ok(())
}
