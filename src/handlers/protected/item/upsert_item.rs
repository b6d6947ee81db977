// handlers/protected/item/upsert_item.rs - POST /api/item/upsert_item

use axum::{extract::State, Extension};
use serde::Serialize;

use crate::api::FormBody;
use crate::database::models::ItemDraft;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{upload_all, UploadOutcome};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UpsertResult {
    pub item_id: i64,
    pub uploads: Vec<UploadOutcome>,
}

/// POST /api/item/upsert_item - create or edit a listing owned by the caller
///
/// `item_id > 0` edits an existing listing and 404s unless the caller owns
/// it; otherwise a new listing is created and the answer is 201. Uploaded `files` are appended to
/// the listing's images.
pub async fn upsert_item_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    form: FormBody,
) -> ApiResult<UpsertResult> {
    let draft = ItemDraft {
        category_id: form.parse_or_default("category_id"),
        title: form.text("title"),
        content: form.text("content"),
        price: form.parse_or_default("price"),
    };
    let requested_id: i64 = form.parse_or_default("item_id");

    let created = requested_id <= 0;
    let item_id = if !created {
        if !state.items.is_owned_by(requested_id, user.id()).await? {
            return Err(ApiError::not_found("Item does not exist"));
        }
        state.items.update(requested_id, &draft).await?;
        tracing::info!("User id={} updated item id={}", user.id(), requested_id);
        requested_id
    } else {
        let id = state.items.insert(user.id(), &draft).await?;
        tracing::info!("User id={} created item id={}", user.id(), id);
        id
    };

    let files = form.into_files();
    let uploads = upload_all(
        state.image_host.as_ref(),
        files.iter().map(|f| (f.name.as_str(), f.bytes.as_ref())),
    )
    .await;

    for url in uploads.iter().filter_map(UploadOutcome::hosted_url) {
        state.items.add_image(item_id, url).await?;
    }

    let result = UpsertResult { item_id, uploads };
    Ok(if created {
        ApiResponse::created(result)
    } else {
        ApiResponse::success(result)
    })
}
