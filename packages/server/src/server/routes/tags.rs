use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::common::{ApiError, ApiResult, TagId};
use crate::domains::tag::{Tag, TagInput};
use crate::server::app::AppState;

pub async fn find_all(Extension(state): Extension<AppState>) -> ApiResult<Json<Vec<Tag>>> {
    Ok(Json(Tag::find_all(&state.db_pool).await?))
}

pub async fn save(
    Extension(state): Extension<AppState>,
    Json(input): Json<TagInput>,
) -> ApiResult<Json<Tag>> {
    tracing::info!(tag_id = ?input.id, name = %input.name, "Saving tag");
    Tag::save(&input, &state.db_pool)
        .await
        .map(Json)
        .map_err(ApiError::bad_request)
}

pub async fn delete(
    Extension(state): Extension<AppState>,
    Path(id): Path<TagId>,
) -> ApiResult<StatusCode> {
    tracing::info!(tag_id = %id, "Deleting tag");
    Tag::delete(id, &state.db_pool)
        .await
        .map_err(ApiError::bad_request)?;
    Ok(StatusCode::OK)
}
