//! 商品处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{Product, ProductInput, ProductPatch};
use crate::app::AppState;
use crate::core::error::CoreError;

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    Ok(Json(state.product_service.list()?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let product = state.product_service.get(&id)?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let Json(input) = payload?;
    let product = state.product_service.create(input)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    // 先确认商品存在，再解析请求体
    state.product_service.get(&id)?;
    let patch = match payload {
        Ok(Json(patch)) => patch,
        // 没有 JSON 请求体时按空修改处理
        Err(JsonRejection::MissingJsonContentType(_)) => ProductPatch::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let product = state.product_service.update(&id, patch)?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.product_service.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
