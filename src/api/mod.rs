//! # HTTP API
//!
//! A thin axum layer over [`OrderService`] and the directory clients.
//!
//! | Route | Handler |
//! |---|---|
//! | `POST /api/orders` | [`orders::place_order`] |
//! | `GET /api/orders/{id}` | [`orders::get_order`] |
//! | `PUT /api/orders/{id}/deliver` | [`orders::deliver_order`] |
//! | `PUT /api/orders/{id}/cancel`, `DELETE /api/orders/{id}` | [`orders::cancel_order`] |
//! | `POST /api/users` | [`catalog::create_user`] |
//! | `POST /api/products` | [`catalog::create_product`] |
//! | `GET /api/products/{id}` | [`catalog::get_product`] |

pub mod caller;
pub mod catalog;
pub mod error;
pub mod orders;

pub use caller::{Caller, USER_ID_HEADER};
pub use error::{ApiError, ApiResult};

use crate::clients::{ProductClient, UserClient};
use crate::lifecycle::OrderSystem;
use crate::service::OrderService;
use axum::routing::{get, post, put};
use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub service: OrderService,
    pub users: UserClient,
    pub products: ProductClient,
}

impl From<&OrderSystem> for AppState {
    fn from(system: &OrderSystem) -> Self {
        Self {
            service: system.service.clone(),
            users: system.user_client.clone(),
            products: system.product_client.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", post(orders::place_order))
        .route(
            "/api/orders/{id}",
            get(orders::get_order).delete(orders::cancel_order),
        )
        .route("/api/orders/{id}/deliver", put(orders::deliver_order))
        .route("/api/orders/{id}/cancel", put(orders::cancel_order))
        .route("/api/users", post(catalog::create_user))
        .route("/api/products", post(catalog::create_product))
        .route("/api/products/{id}", get(catalog::get_product))
        .with_state(state)
}
