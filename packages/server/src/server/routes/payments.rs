use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::common::{ApiError, ApiResult, MemberId};
use crate::domains::payment::actions;
use crate::domains::payment::{NewPayment, PaymentHistory};
use crate::server::app::AppState;

pub async fn save(
    Extension(state): Extension<AppState>,
    Json(payment): Json<NewPayment>,
) -> ApiResult<Json<PaymentHistory>> {
    actions::save_payment(payment, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

/// Remove the member's current-year payment; 204 whether or not one existed.
pub async fn delete_current_year(
    Extension(state): Extension<AppState>,
    Path(member_id): Path<MemberId>,
) -> ApiResult<StatusCode> {
    actions::delete_current_year_payment(member_id, &state.db_pool)
        .await
        .map_err(ApiError::bad_request)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn total_members_paid_for_current_year(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<i64>> {
    Ok(Json(
        actions::total_members_paid_for_current_year(&state.db_pool).await?,
    ))
}
