use super::{resource_id, UserId};
use serde::{Deserialize, Serialize};

resource_id!(
    /// Type-safe identifier for Products.
    ProductId,
    "product"
);

/// A listed product and its inventory ledger entry.
///
/// `stock_remaining` is only changed by the ledger actions in
/// [`crate::product_actor::ProductAction`]; [`ProductUpdate`] cannot touch it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub seller_id: UserId,
    pub name: String,
    pub price: f64,
    pub stock_remaining: u32,
}

impl Product {
    pub fn new(id: ProductId, params: ProductCreate) -> Self {
        Self {
            id,
            seller_id: params.seller_id,
            name: params.name,
            price: params.price,
            stock_remaining: params.stock_remaining,
        }
    }
}

/// Payload for listing a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub seller_id: UserId,
    pub name: String,
    pub price: f64,
    pub stock_remaining: u32,
}

/// Catalogue fields a seller may edit after listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
}
