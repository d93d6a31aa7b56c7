use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::case::Case;
use crate::services::resolver;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseQuery {
    pub order_number: String,
    pub email: String,
}

/// GET /api/cases?orderNumber=&email= — unified lookup across both
/// collections, claims first.
pub async fn find_case(
    State(state): State<AppState>,
    Query(query): Query<CaseQuery>,
) -> Result<Json<Case>, ApiError> {
    resolver::find_by_order_and_email(&state.db, &query.order_number, &query.email)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("No case found"))
}

/// GET /api/cases/{id} — unified lookup by id, claims first.
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Case>, ApiError> {
    resolver::find_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Case not found"))
}
