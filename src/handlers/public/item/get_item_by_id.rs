// handlers/public/item/get_item_by_id.rs - GET /api/item/get_item_by_id

use axum::extract::State;

use crate::api::QueryPairs;
use crate::database::models::ItemDetail;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/item/get_item_by_id?item_id=N - listing with category, location,
/// embedding and images
pub async fn get_item_by_id(State(state): State<AppState>, query: QueryPairs) -> ApiResult<ItemDetail> {
    let item_id: i64 = query
        .first("item_id")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::missing_field("item_id"))?
        .parse()
        .map_err(|_| ApiError::bad_request("item_id must be an integer"))?;

    let item = state
        .items
        .find_detail(item_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    Ok(ApiResponse::success(item))
}
