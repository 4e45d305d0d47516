use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::common::{ApiError, ApiResult, DependentId, MemberId};
use crate::domains::dependent::actions;
use crate::domains::dependent::{DependentData, DependentInput};
use crate::server::app::AppState;

pub async fn find_by_member_id(
    Extension(state): Extension<AppState>,
    Path(member_id): Path<MemberId>,
) -> ApiResult<Json<Vec<DependentData>>> {
    Ok(Json(actions::find_by_member_id(member_id, &state.db_pool).await?))
}

pub async fn save(
    Extension(state): Extension<AppState>,
    Path(member_id): Path<MemberId>,
    Json(input): Json<DependentInput>,
) -> ApiResult<Json<DependentData>> {
    actions::save_dependent(member_id, input, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

/// Deleting an unknown dependent is a 400, like any other failed delete.
pub async fn delete(
    Extension(state): Extension<AppState>,
    Path(id): Path<DependentId>,
) -> ApiResult<StatusCode> {
    actions::delete_dependent(id, &state.db_pool)
        .await
        .map_err(ApiError::bad_request)?;
    Ok(StatusCode::OK)
}
