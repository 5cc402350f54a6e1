//! [`ActorEntity`] implementation for [`Product`].

use super::{ProductAction, ProductError};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::ValidationError("name must not be empty".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::ValidationError(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = u32;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        validate_price(params.price)?;
        Ok(Product::new(id, params))
    }

    /// Catalogue edits only; stock moves through [`ProductAction`].
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<u32, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(self.stock_remaining),
            ProductAction::Reserve(0) | ProductAction::Release(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::Reserve(quantity) => {
                if self.stock_remaining < quantity {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock_remaining,
                    });
                }
                self.stock_remaining -= quantity;
                Ok(self.stock_remaining)
            }
            ProductAction::Release(quantity) => {
                self.stock_remaining = self.stock_remaining.checked_add(quantity).ok_or(
                    ProductError::StockOverflow {
                        current: self.stock_remaining,
                        released: quantity,
                    },
                )?;
                Ok(self.stock_remaining)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    fn product(stock: u32) -> Product {
        Product::from_create_params(
            ProductId(1),
            ProductCreate {
                seller_id: UserId(2),
                name: "Lamp".into(),
                price: 12.5,
                stock_remaining: stock,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn reserve_refuses_to_go_negative() {
        let mut lamp = product(3);
        assert_eq!(lamp.handle_action(ProductAction::Reserve(3), &()).await, Ok(0));
        assert_eq!(
            lamp.handle_action(ProductAction::Reserve(1), &()).await,
            Err(ProductError::InsufficientStock {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(lamp.stock_remaining, 0);
    }

    #[tokio::test]
    async fn reserve_then_release_restores_stock() {
        let mut lamp = product(7);
        lamp.handle_action(ProductAction::Reserve(4), &()).await.unwrap();
        let back = lamp.handle_action(ProductAction::Release(4), &()).await.unwrap();
        assert_eq!(back, 7);
    }

    #[tokio::test]
    async fn zero_quantity_and_overflow_are_rejected() {
        let mut lamp = product(u32::MAX - 1);
        assert_eq!(
            lamp.handle_action(ProductAction::Reserve(0), &()).await,
            Err(ProductError::InvalidQuantity(0))
        );
        assert!(matches!(
            lamp.handle_action(ProductAction::Release(2), &()).await,
            Err(ProductError::StockOverflow { .. })
        ));
        assert_eq!(lamp.stock_remaining, u32::MAX - 1);
    }

    #[tokio::test]
    async fn update_cannot_touch_stock() {
        let mut lamp = product(5);
        let update = ProductUpdate {
            name: Some("Desk lamp".into()),
            price: Some(-1.0),
        };
        assert!(lamp.on_update(update, &()).await.is_err());
        assert_eq!(lamp.name, "Lamp");

        let update = ProductUpdate {
            name: None,
            price: Some(15.0),
        };
        lamp.on_update(update, &()).await.unwrap();
        assert_eq!(lamp.price, 15.0);
        assert_eq!(lamp.stock_remaining, 5);
    }
}
