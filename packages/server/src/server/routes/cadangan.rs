use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::common::{ApiError, ApiResult, CadanganId, CadanganTypeId, Page, PageParams};
use crate::domains::cadangan::{Cadangan, CadanganInput, CadanganType};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadanganQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub cadangan_type_id: Option<CadanganTypeId>,
    pub is_open: bool,
}

/// `GET /cadangan?page&size&cadanganTypeId&isOpen`, ordered by id
pub async fn list(
    Extension(state): Extension<AppState>,
    Query(query): Query<CadanganQuery>,
) -> ApiResult<Json<Page<Cadangan>>> {
    let request = PageParams {
        page: query.page,
        size: query.size,
        ..Default::default()
    }
    .validate();

    let (content, total) =
        Cadangan::find_page(query.cadangan_type_id, query.is_open, &request, &state.db_pool)
            .await?;
    Ok(Json(Page::new(content, total, &request)))
}

pub async fn find_by_id(
    Extension(state): Extension<AppState>,
    Path(id): Path<CadanganId>,
) -> ApiResult<Json<Cadangan>> {
    Cadangan::find_by_id(id, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("cadangan {}", id)))
}

/// `[baru, cadangan, aduan, lain-lain, closed]`
pub async fn count(Extension(state): Extension<AppState>) -> ApiResult<Json<[i64; 5]>> {
    let counts = Cadangan::counts(&state.db_pool).await?;
    Ok(Json(counts.to_array()))
}

pub async fn create(
    Extension(state): Extension<AppState>,
    Json(input): Json<CadanganInput>,
) -> ApiResult<Json<Cadangan>> {
    info!("Creating cadangan");
    Cadangan::insert(&input, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

pub async fn update(
    Extension(state): Extension<AppState>,
    Path(id): Path<CadanganId>,
    Json(input): Json<CadanganInput>,
) -> ApiResult<Json<Cadangan>> {
    info!(cadangan_id = %id, "Updating cadangan");
    Cadangan::update(id, &input, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

pub async fn delete(
    Extension(state): Extension<AppState>,
    Path(id): Path<CadanganId>,
) -> ApiResult<StatusCode> {
    info!(cadangan_id = %id, "Deleting cadangan");
    let removed = Cadangan::delete(id, &state.db_pool)
        .await
        .map_err(ApiError::bad_request)?;

    if removed == 0 {
        return Err(ApiError::not_found(format!("cadangan {}", id)));
    }
    Ok(StatusCode::OK)
}

pub async fn list_types(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<CadanganType>>> {
    Ok(Json(CadanganType::find_all(&state.db_pool).await?))
}
