use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use garde::Validate;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::return_queries;
use crate::error::ApiError;
use crate::models::returns::{NewReturn, Return, ReturnPatch};
use crate::routes::claims::PairFilter;

/// POST /api/returns — accept a new product return. No notification side
/// effect, unlike claims.
pub async fn create_return(
    State(state): State<AppState>,
    Json(payload): Json<NewReturn>,
) -> Result<(StatusCode, Json<Return>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let ret = return_queries::create_return(&state.db, &payload).await?;
    metrics::counter!("cases_submitted_total", "kind" => "return").increment(1);

    tracing::info!(return_id = %ret.id, order_number = %ret.order_number, "return created");
    Ok((StatusCode::CREATED, Json(ret)))
}

/// GET /api/returns — all returns, or those matching an (orderNumber, email) pair.
pub async fn list_returns(
    State(state): State<AppState>,
    Query(filter): Query<PairFilter>,
) -> Result<Json<Vec<Return>>, ApiError> {
    let returns = match filter.pair() {
        Some((order_number, email)) => {
            return_queries::list_returns_for_order(&state.db, order_number, email).await?
        }
        None => return_queries::list_returns(&state.db).await?,
    };
    Ok(Json(returns))
}

/// GET /api/returns/{id}
pub async fn get_return(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Return>, ApiError> {
    return_queries::get_return(&state.db, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Return not found"))
}

/// PATCH /api/returns/{id} — merge the supplied fields into the return.
pub async fn update_return(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ReturnPatch>,
) -> Result<Json<Return>, ApiError> {
    let ret = return_queries::update_return(&state.db, id, &patch)
        .await?
        .ok_or(ApiError::NotFound("Return not found"))?;

    tracing::info!(return_id = %ret.id, status = %ret.status, "return updated");
    Ok(Json(ret))
}
