//! Route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use super::AppState;
use super::error::AppError;
use super::types::{ItemsResponse, MessageResponse, SearchQuery};
use crate::services::catalog::Item;

/// GET / - Liveness message.
pub(crate) async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello, world!".to_string(),
    })
}

/// POST /items - Add an item from a `name`, `category`, `image` multipart form.
pub(crate) async fn add_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let mut name = None;
    let mut category = None;
    let mut image = None;

    while let Some(mut field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await?),
            Some("category") => category = Some(field.text().await?),
            Some("image") => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.chunk().await? {
                    if bytes.len() + chunk.len() > state.max_upload_bytes {
                        return Err(AppError::PayloadTooLarge(format!(
                            "Image exceeds the {} byte upload limit",
                            state.max_upload_bytes
                        )));
                    }
                    bytes.extend_from_slice(&chunk);
                }
                image = Some(bytes);
            },
            other => debug!(field = ?other, "Ignoring unknown form field"),
        }
    }

    let name = name.ok_or_else(|| AppError::BadRequest("Missing form field: name".into()))?;
    let category =
        category.ok_or_else(|| AppError::BadRequest("Missing form field: category".into()))?;
    let image = image.ok_or_else(|| AppError::BadRequest("Missing form field: image".into()))?;

    let item = state.service.add_item(&name, &category, &image).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /items - List every item.
pub(crate) async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<ItemsResponse>, AppError> {
    let items = state.service.list_items().await?;
    Ok(Json(ItemsResponse { items }))
}

/// GET /items/{id} - Get one item.
pub(crate) async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let item = state.service.get_item_by_str(&id).await?;
    Ok(Json(item))
}

/// GET /search?keyword= - Items whose name contains the keyword.
pub(crate) async fn search_items(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ItemsResponse>, AppError> {
    let items = state.service.search_items(&query.keyword).await?;
    Ok(Json(ItemsResponse { items }))
}

/// GET /image/{filename} - Image bytes, or the placeholder if unknown.
pub(crate) async fn get_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let image = state.service.image(&filename).await?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], image.bytes))
}
