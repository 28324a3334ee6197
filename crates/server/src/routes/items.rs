use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common::types::ApiResponse;
use models::{Item, ItemPayload};
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::routes::ServerState;

const INVALID_BODY: &str = "Invalid JSON body";

/// Empty bodies count as `{}`; the Content-Type header is not checked.
fn parse_payload(body: &[u8]) -> Result<ItemPayload, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ItemPayload::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "unparsable item payload");
        ApiError::BadRequest(INVALID_BODY.to_string())
    })
}

#[utoipa::path(
    get, path = "/items", tag = "items",
    responses((status = 200, description = "All items with count", body = crate::openapi::ItemListDoc))
)]
pub async fn list_items(State(state): State<ServerState>) -> Json<ApiResponse<Vec<Item>>> {
    let items = state.items.list().await;
    info!(count = items.len(), "list items");
    Json(ApiResponse::list(items))
}

#[utoipa::path(
    post, path = "/items", tag = "items",
    request_body = crate::openapi::ItemInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create_item(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<Item>>), ApiError> {
    let payload = parse_payload(&body)?;
    let item = state.items.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(item).with_message("Item created successfully")),
    ))
}

#[utoipa::path(
    get, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ItemEnvelopeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    let item = state.items.get(&id).await?;
    Ok(Json(ApiResponse::data(item)))
}

#[utoipa::path(
    put, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item id")),
    request_body = crate::openapi::ItemInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    let payload = parse_payload(&body)?;
    let item = state.items.update(&id, payload).await?;
    Ok(Json(ApiResponse::data(item).with_message("Item updated successfully")))
}

#[utoipa::path(
    delete, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.items.delete(&id).await?;
    Ok(Json(ApiResponse::ok("Item deleted successfully")))
}
