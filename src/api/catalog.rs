//! `/api/users` and `/api/products` handlers: the directory and catalogue
//! operations needed to set up orders.

use super::{ApiError, ApiResult, AppState, Caller};
use crate::model::{Product, ProductCreate, ProductId, Role, User, UserCreate};
use actor_framework::ActorClient;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<UserCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(params) = body?;
    let id = state.users.create_user(params.clone()).await?;
    Ok((StatusCode::CREATED, Json(User::new(id, params))))
}

/// Body of `POST /api/products`; the seller is the caller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock_remaining: u32,
}

pub async fn create_product(
    State(state): State<AppState>,
    Caller(seller): Caller,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(req) = body?;
    match state.users.get(seller).await? {
        Some(user) if user.is(Role::Seller) => {}
        _ => return Err(ApiError::forbidden(format!("{seller} is not a seller"))),
    }

    let params = ProductCreate {
        seller_id: seller,
        name: req.name,
        price: req.price,
        stock_remaining: req.stock_remaining,
    };
    let id = state.products.create_product(params.clone()).await?;
    Ok((StatusCode::CREATED, Json(Product::new(id, params))))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id: ProductId = id.parse()?;
    state
        .products
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::NOT_FOUND,
                "ProductNotFound",
                format!("Product not found: {id}"),
            )
        })
}
