use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use garde::Validate;
use serde::Deserialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::claim_queries;
use crate::error::ApiError;
use crate::models::claim::{Claim, ClaimPatch, NewClaim};
use crate::services::outbox::{NoticeKind, QueuedNotice};

/// Optional (order number, email) pair filter for list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairFilter {
    pub order_number: Option<String>,
    pub email: Option<String>,
}

impl PairFilter {
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.order_number.as_deref(), self.email.as_deref()) {
            (Some(order_number), Some(email)) => Some((order_number, email)),
            _ => None,
        }
    }
}

/// POST /api/claims — accept a new warranty claim.
///
/// The record is created as Pending regardless of the request body, and the
/// submission notice is enqueued only after the row is committed.
pub async fn create_claim(
    State(state): State<AppState>,
    Json(payload): Json<NewClaim>,
) -> Result<(StatusCode, Json<Claim>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let claim = claim_queries::create_claim(&state.db, &payload).await?;
    metrics::counter!("cases_submitted_total", "kind" => "claim").increment(1);

    enqueue_notice(&state, &claim, NoticeKind::Submission).await;

    tracing::info!(claim_id = %claim.id, order_number = %claim.order_number, "claim created");
    Ok((StatusCode::CREATED, Json(claim)))
}

/// GET /api/claims — all claims, or those matching an (orderNumber, email) pair.
pub async fn list_claims(
    State(state): State<AppState>,
    Query(filter): Query<PairFilter>,
) -> Result<Json<Vec<Claim>>, ApiError> {
    let claims = match filter.pair() {
        Some((order_number, email)) => {
            claim_queries::list_claims_for_order(&state.db, order_number, email).await?
        }
        None => claim_queries::list_claims(&state.db).await?,
    };
    Ok(Json(claims))
}

/// GET /api/claims/{id}
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Claim>, ApiError> {
    claim_queries::get_claim(&state.db, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Claim not found"))
}

/// PATCH /api/claims/{id} — merge the supplied fields into the claim.
pub async fn update_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ClaimPatch>,
) -> Result<Json<Claim>, ApiError> {
    let claim = claim_queries::update_claim(&state.db, id, &patch)
        .await?
        .ok_or(ApiError::NotFound("Claim not found"))?;

    enqueue_notice(&state, &claim, NoticeKind::StatusChange).await;

    tracing::info!(claim_id = %claim.id, status = %claim.status, "claim updated");
    Ok(Json(claim))
}

/// Delivery is best effort once the row is committed; an outbox failure is
/// logged and counted, never surfaced to the caller.
async fn enqueue_notice(state: &AppState, claim: &Claim, kind: NoticeKind) {
    let notice = QueuedNotice {
        claim_id: claim.id,
        recipient: claim.email.clone(),
        kind,
        attempts: 0,
    };

    match state.outbox.enqueue(&notice).await {
        Ok(()) => metrics::counter!("notices_enqueued_total").increment(1),
        Err(e) => {
            metrics::counter!("notices_dropped_total").increment(1);
            tracing::error!(claim_id = %claim.id, error = %e, "failed to enqueue notice");
        }
    }
}
