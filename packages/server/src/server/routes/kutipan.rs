use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::common::{ApiError, ApiResult, KutipanId, PageParams, TabungId};
use crate::domains::tabung::actions::{find_kutipan_between, save_kutipan, KutipanListing};
use crate::domains::tabung::{Kutipan, KutipanInput};
use crate::server::app::AppState;

/// Inclusive create-date range, optionally paged
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetweenQuery {
    pub from_date: i64,
    pub to_date: i64,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// All kutipan for a tabung, newest first
pub async fn list_by_tabung(
    Extension(state): Extension<AppState>,
    Path(tabung_id): Path<TabungId>,
) -> ApiResult<Json<Vec<Kutipan>>> {
    Ok(Json(Kutipan::find_by_tabung(tabung_id, &state.db_pool).await?))
}

/// A list, or a page when `page` or `size` is given
pub async fn list_between_create_dates(
    Extension(state): Extension<AppState>,
    Path(tabung_id): Path<TabungId>,
    Query(query): Query<BetweenQuery>,
) -> ApiResult<Json<KutipanListing>> {
    let page = (query.page.is_some() || query.size.is_some()).then(|| {
        PageParams {
            page: query.page,
            size: query.size,
            ..Default::default()
        }
        .validate()
    });

    let listing =
        find_kutipan_between(tabung_id, query.from_date, query.to_date, page, &state.db_pool)
            .await?;
    Ok(Json(listing))
}

pub async fn find_by_id(
    Extension(state): Extension<AppState>,
    Path(id): Path<KutipanId>,
) -> ApiResult<Json<Kutipan>> {
    Kutipan::find_by_id(id, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("kutipan {}", id)))
}

pub async fn save(
    Extension(state): Extension<AppState>,
    Json(input): Json<KutipanInput>,
) -> ApiResult<Json<Kutipan>> {
    save_kutipan(input, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

pub async fn delete(
    Extension(state): Extension<AppState>,
    Path(id): Path<KutipanId>,
) -> ApiResult<StatusCode> {
    info!(kutipan_id = %id, "Deleting kutipan");
    Kutipan::delete(id, &state.db_pool)
        .await
        .map_err(ApiError::bad_request)?;
    Ok(StatusCode::OK)
}
