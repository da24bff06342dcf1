use axum::{
    routing::get,
    Router,
    Json,
    extract::{rejection::JsonRejection, State, Path},
    http::{header, StatusCode},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;
use std::sync::Arc;

use crate::domain::models::Item;
use crate::domain::services::item_service::ItemService;
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
}

#[derive(OpenApi)]
#[openapi(
    paths(list_items, get_item, create_item, update_item, delete_item),
    components(schemas(ItemDto, CreateItemRequest, UpdateItemRequest)),
    tags((name = "items", description = "Item catalog endpoints"))
)]
pub struct ItemsApiDoc;

/// 对外暴露的商品视图，与内部记录分开定义
///
/// 价格以 JSON 数字原样输出全部有效位，不经过浮点转换。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64, example = 9)]
    pub price: Decimal,
    pub created_date: DateTime<Utc>,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            created_date: item.created_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64, example = 9)]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64, example = 9)]
    pub price: Decimal,
}

#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses((status = 200, description = "All items in the catalog", body = [ItemDto]))
)]
async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemDto>>, AppError> {
    let item_service = ItemService::new(state.clone());

    let items = item_service.list_items().await?
        .into_iter()
        .map(ItemDto::from)
        .collect();

    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = ItemDto),
        (status = 404, description = "No item with this id")
    )
)]
async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemDto>, AppError> {
    let item_service = ItemService::new(state.clone());

    let item = item_service.get_item(id).await?;

    Ok(Json(ItemDto::from(item)))
}

#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemDto,
            headers(("Location" = String, description = "URL of the created item"))),
        (status = 400, description = "Body does not bind to the request shape")
    )
)]
async fn create_item(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<ItemDto>), AppError> {
    let Json(payload) = payload?;

    let item_service = ItemService::new(state.clone());

    let item = item_service.create_item(&payload.name, payload.price).await?;

    // Location 指向按 id 查询的接口
    let location = format!("/items/{}", item.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(ItemDto::from(item))))
}

#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = UpdateItemRequest,
    responses(
        (status = 204, description = "Item replaced"),
        (status = 400, description = "Body does not bind to the request shape"),
        (status = 404, description = "No item with this id")
    )
)]
async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload?;

    let item_service = ItemService::new(state.clone());

    item_service.update_item(id, &payload.name, payload.price).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item removed"),
        (status = 404, description = "No item with this id")
    )
)]
async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let item_service = ItemService::new(state.clone());

    item_service.delete_item(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
