//! `/api/orders` handlers.

use super::{ApiResult, AppState, Caller};
use crate::model::{Order, OrderId, PlaceOrder};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn place_order(
    State(state): State<AppState>,
    Caller(buyer): Caller,
    body: Result<Json<PlaceOrder>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let Json(req) = body?;
    let order = state
        .service
        .create_order(buyer, req.seller_id, req.product_id, req.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let id: OrderId = id.parse()?;
    Ok(Json(state.service.get_order(id).await?))
}

pub async fn deliver_order(
    State(state): State<AppState>,
    Caller(requester): Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let id: OrderId = id.parse()?;
    Ok(Json(state.service.deliver(id, requester).await?))
}

/// Serves both `PUT /{id}/cancel` and `DELETE /{id}`; orders are never removed.
pub async fn cancel_order(
    State(state): State<AppState>,
    Caller(requester): Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let id: OrderId = id.parse()?;
    Ok(Json(state.service.cancel(id, requester).await?))
}
