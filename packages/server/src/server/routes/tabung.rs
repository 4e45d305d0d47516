use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::common::{ApiError, ApiResult, TabungId, TabungTypeId};
use crate::domains::tabung::actions::save_tabung;
use crate::domains::tabung::{Tabung, TabungInput, TabungType, TabungTypeInput};
use crate::server::app::AppState;

pub async fn list_types(Extension(state): Extension<AppState>) -> ApiResult<Json<Vec<TabungType>>> {
    Ok(Json(TabungType::find_all(&state.db_pool).await?))
}

pub async fn save_type(
    Extension(state): Extension<AppState>,
    Json(input): Json<TabungTypeInput>,
) -> ApiResult<Json<TabungType>> {
    info!(name = %input.name, "Saving tabung type");
    TabungType::save(&input, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

/// Fails with 400 while tabungs still use the type.
pub async fn delete_type(
    Extension(state): Extension<AppState>,
    Path(id): Path<TabungTypeId>,
) -> ApiResult<StatusCode> {
    info!(tabung_type_id = %id, "Deleting tabung type");
    TabungType::delete(id, &state.db_pool)
        .await
        .map_err(ApiError::bad_request)?;
    Ok(StatusCode::OK)
}

pub async fn list(Extension(state): Extension<AppState>) -> ApiResult<Json<Vec<Tabung>>> {
    Ok(Json(Tabung::find_all(&state.db_pool).await?))
}

pub async fn find_by_id(
    Extension(state): Extension<AppState>,
    Path(id): Path<TabungId>,
) -> ApiResult<Json<Tabung>> {
    Tabung::find_by_id(id, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("tabung {}", id)))
}

pub async fn save(
    Extension(state): Extension<AppState>,
    Json(input): Json<TabungInput>,
) -> ApiResult<Json<Tabung>> {
    save_tabung(input, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

pub async fn delete(
    Extension(state): Extension<AppState>,
    Path(id): Path<TabungId>,
) -> ApiResult<StatusCode> {
    info!(tabung_id = %id, "Deleting tabung");
    Tabung::delete(id, &state.db_pool)
        .await
        .map_err(ApiError::bad_request)?;
    Ok(StatusCode::OK)
}
