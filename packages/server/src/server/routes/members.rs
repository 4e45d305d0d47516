use axum::extract::{Extension, Path, Query};
use axum::Json;
use serde::Deserialize;

use crate::common::{ApiError, ApiResult, MemberId, Page, PageParams};
use crate::domains::member::actions;
use crate::domains::member::{MemberData, MemberInput};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagQuery {
    #[serde(default)]
    pub tag_ids: String,
}

/// `GET /members/findAll?page&size&sort&direction`
pub async fn find_all(
    Extension(state): Extension<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<MemberData>>> {
    let request = params.validate();
    let page = actions::find_members_page(&request, &state.db_pool).await?;
    Ok(Json(page))
}

pub async fn find_by_id(
    Extension(state): Extension<AppState>,
    Path(id): Path<MemberId>,
) -> ApiResult<Json<MemberData>> {
    actions::find_member(id, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("member {}", id)))
}

/// `GET /members/findBy?query=` (`*` lists everyone)
///
/// A failed search is reported as 404, not 400.
pub async fn find_by_query(
    Extension(state): Extension<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<Json<Vec<MemberData>>> {
    actions::find_members_by_query(&search.query, &state.db_pool)
        .await
        .map(Json)
        .map_err(|e| ApiError::not_found(format!("members matching {:?}: {e:#}", search.query)))
}

/// `GET /members/findByTag?tagIds=1,2,3`
pub async fn find_by_tags(
    Extension(state): Extension<AppState>,
    Query(query): Query<TagQuery>,
) -> ApiResult<Json<Vec<MemberData>>> {
    let members = actions::find_members_by_tags(&query.tag_ids, &state.db_pool).await?;
    Ok(Json(members))
}

pub async fn count(Extension(state): Extension<AppState>) -> ApiResult<Json<i64>> {
    Ok(Json(actions::count_members(&state.db_pool).await?))
}

pub async fn save(
    Extension(state): Extension<AppState>,
    Json(input): Json<MemberInput>,
) -> ApiResult<Json<MemberData>> {
    actions::save_member(input, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}
