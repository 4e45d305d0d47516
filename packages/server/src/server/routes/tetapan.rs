use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::common::{ApiError, ApiResult};
use crate::domains::tetapan::Tetapan;
use crate::server::app::AppState;

pub async fn find_all(Extension(state): Extension<AppState>) -> ApiResult<Json<Vec<Tetapan>>> {
    Ok(Json(Tetapan::find_all(&state.db_pool).await?))
}

pub async fn find_by_kunci(
    Extension(state): Extension<AppState>,
    Path(kunci): Path<String>,
) -> ApiResult<Json<Tetapan>> {
    Tetapan::find_by_kunci(&kunci, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("tetapan {}", kunci)))
}

pub async fn save(
    Extension(state): Extension<AppState>,
    Json(tetapan): Json<Tetapan>,
) -> ApiResult<Json<Tetapan>> {
    info!(kunci = %tetapan.kunci, "Saving tetapan");
    tetapan
        .upsert(&state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

/// `POST /tetapan/senarai`: all or nothing
pub async fn save_all(
    Extension(state): Extension<AppState>,
    Json(entries): Json<Vec<Tetapan>>,
) -> ApiResult<Json<Vec<Tetapan>>> {
    Tetapan::upsert_all(&entries, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

pub async fn delete(
    Extension(state): Extension<AppState>,
    Path(kunci): Path<String>,
) -> ApiResult<StatusCode> {
    info!(%kunci, "Deleting tetapan");
    Tetapan::delete(&kunci, &state.db_pool)
        .await
        .map_err(ApiError::bad_request)?;
    Ok(StatusCode::OK)
}
