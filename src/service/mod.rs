//! # Order Service
//!
//! Orchestrates the order lifecycle across the three actors:
//!
//! - **create**: validate parties and product, reserve stock, persist the
//!   order; if persisting fails the reservation is released again.
//! - **deliver**: seller-only transition, stock stays consumed.
//! - **cancel**: buyer or seller transition, followed by one release.
//!
//! Each step is a single actor message. There are no internal retries.

use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::clock::SharedClock;
use crate::model::{Order, OrderCreate, OrderId, ProductId, Role, UserId};
use crate::order_actor::OrderError;
use crate::user_actor::UserError;
use actor_framework::ActorClient;
use tracing::{error, info, instrument, warn};

#[derive(Clone)]
pub struct OrderService {
    users: UserClient,
    products: ProductClient,
    orders: OrderClient,
    clock: SharedClock,
}

impl OrderService {
    pub fn new(
        users: UserClient,
        products: ProductClient,
        orders: OrderClient,
        clock: SharedClock,
    ) -> Self {
        Self {
            users,
            products,
            orders,
            clock,
        }
    }

    /// Places an `OPEN` order and reserves `quantity` units for it.
    ///
    /// # Errors
    /// - `InvalidInput`: zero quantity, unknown or wrong-role buyer or
    ///   seller, product sold by someone else
    /// - `ProductNotFound`, `InsufficientStock`: nothing was reserved
    /// - `StorageFailure`: the order could not be stored; the reservation
    ///   has been released
    #[instrument(skip(self))]
    pub async fn create_order(
        &self,
        buyer_id: UserId,
        seller_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Order, OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidInput("quantity must be positive".into()));
        }
        self.require_party(buyer_id, Role::Buyer).await?;
        self.require_party(seller_id, Role::Seller).await?;

        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| OrderError::ProductNotFound(product_id.to_string()))?;
        if product.seller_id != seller_id {
            return Err(OrderError::InvalidInput(format!(
                "{product_id} is not sold by {seller_id}"
            )));
        }

        let remaining = self.products.reserve(product_id, quantity).await?;
        info!(%product_id, quantity, remaining, "Stock reserved");

        let params = OrderCreate {
            buyer_id,
            seller_id,
            product_id,
            quantity,
            created_at: self.clock.now(),
        };
        match self.orders.create_order(params.clone()).await {
            Ok(id) => {
                info!(order_id = %id, "Order placed");
                Ok(Order::open(id, params))
            }
            Err(e) => {
                warn!(error = %e, %product_id, quantity, "Order not stored, releasing reservation");
                if let Err(release_err) = self.products.release(product_id, quantity).await {
                    error!(
                        error = %release_err,
                        %product_id,
                        quantity,
                        "Compensating release failed, stock is short until corrected"
                    );
                }
                Err(OrderError::StorageFailure(e.to_string()))
            }
        }
    }

    /// Seller confirms delivery of an open order.
    #[instrument(skip(self))]
    pub async fn deliver(&self, order_id: OrderId, requester: UserId) -> Result<Order, OrderError> {
        let order = self.orders.deliver(order_id, requester).await?;
        info!(%order_id, "Order delivered");
        Ok(order)
    }

    /// Buyer or seller cancels an open order; the reserved stock goes back.
    ///
    /// The cancel is committed before the release. If the release fails the
    /// order is still returned as `CANCELLED` and the failure is logged.
    #[instrument(skip(self))]
    pub async fn cancel(&self, order_id: OrderId, requester: UserId) -> Result<Order, OrderError> {
        let order = self.orders.cancel(order_id, requester).await?;
        match self.products.release(order.product_id, order.quantity).await {
            Ok(remaining) => {
                info!(
                    %order_id,
                    product_id = %order.product_id,
                    remaining,
                    "Order cancelled, stock released"
                );
            }
            Err(e) => {
                error!(
                    error = %e,
                    %order_id,
                    product_id = %order.product_id,
                    quantity = order.quantity,
                    "Order cancelled but stock release failed"
                );
            }
        }
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    async fn require_party(&self, id: UserId, role: Role) -> Result<(), OrderError> {
        match self.users.require(id).await {
            Ok(user) if user.is(role) => Ok(()),
            Ok(user) => Err(OrderError::InvalidInput(format!(
                "{id} is a {:?}, expected {role:?}",
                user.role
            ))),
            Err(UserError::NotFound(_)) => {
                Err(OrderError::InvalidInput(format!("unknown {role:?} {id}")))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{Product, User};
    use crate::product_actor::ProductError;
    use actor_framework::mock::MockClient;
    use actor_framework::FrameworkError;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    const BUYER: UserId = UserId(1);
    const SELLER: UserId = UserId(2);
    const PRODUCT: ProductId = ProductId(1);

    struct Mocks {
        users: MockClient<User>,
        products: MockClient<Product>,
        orders: MockClient<Order>,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                users: MockClient::new(),
                products: MockClient::new(),
                orders: MockClient::new(),
            }
        }

        fn service(&self) -> OrderService {
            let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
            OrderService::new(
                UserClient::new(self.users.client()),
                ProductClient::new(self.products.client()),
                OrderClient::new(self.orders.client()),
                Arc::new(ManualClock::new(t0)),
            )
        }

        fn parties_ok(&mut self) {
            self.users.expect_get(BUYER).return_ok(Some(user(BUYER, Role::Buyer)));
            self.users.expect_get(SELLER).return_ok(Some(user(SELLER, Role::Seller)));
        }

        fn verify(&self) {
            self.users.verify();
            self.products.verify();
            self.orders.verify();
        }
    }

    fn user(id: UserId, role: Role) -> User {
        User {
            id,
            name: "someone".into(),
            email: "someone@example.com".into(),
            role,
        }
    }

    fn product(seller_id: UserId, stock: u32) -> Product {
        Product {
            id: PRODUCT,
            seller_id,
            name: "Kettle".into(),
            price: 30.0,
            stock_remaining: stock,
        }
    }

    #[tokio::test]
    async fn failed_persist_releases_the_reservation() {
        let mut mocks = Mocks::new();
        mocks.parties_ok();
        mocks.products.expect_get(PRODUCT).return_ok(Some(product(SELLER, 5)));
        mocks.products.expect_action(PRODUCT).return_ok(3);
        mocks.orders.expect_create().return_err(FrameworkError::ActorClosed);
        mocks.products.expect_action(PRODUCT).return_ok(5);

        let err = mocks
            .service()
            .create_order(BUYER, SELLER, PRODUCT, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::StorageFailure(_)));
        mocks.verify();
    }

    #[tokio::test]
    async fn failed_compensation_still_reports_storage_failure() {
        let mut mocks = Mocks::new();
        mocks.parties_ok();
        mocks.products.expect_get(PRODUCT).return_ok(Some(product(SELLER, 5)));
        mocks.products.expect_action(PRODUCT).return_ok(3);
        mocks.orders.expect_create().return_err(FrameworkError::ActorDropped);
        mocks.products.expect_action(PRODUCT).return_err(FrameworkError::ActorClosed);

        let err = mocks
            .service()
            .create_order(BUYER, SELLER, PRODUCT, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::StorageFailure(_)));
        mocks.verify();
    }

    #[tokio::test]
    async fn insufficient_stock_creates_nothing() {
        let mut mocks = Mocks::new();
        mocks.parties_ok();
        mocks.products.expect_get(PRODUCT).return_ok(Some(product(SELLER, 1)));
        mocks
            .products
            .expect_action(PRODUCT)
            .return_err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    requested: 2,
                    available: 1,
                },
            )));

        let err = mocks
            .service()
            .create_order(BUYER, SELLER, PRODUCT, 2)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InsufficientStock {
                requested: 2,
                available: 1
            }
        );
        mocks.verify();
    }

    #[tokio::test]
    async fn parties_must_hold_their_roles() {
        let mut mocks = Mocks::new();
        mocks.users.expect_get(BUYER).return_ok(Some(user(BUYER, Role::Seller)));
        let err = mocks
            .service()
            .create_order(BUYER, SELLER, PRODUCT, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidInput(_)));

        mocks.users.expect_get(BUYER).return_ok(Some(user(BUYER, Role::Buyer)));
        mocks.users.expect_get(SELLER).return_ok(None);
        let err = mocks
            .service()
            .create_order(BUYER, SELLER, PRODUCT, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidInput(_)));
        mocks.verify();
    }

    #[tokio::test]
    async fn product_must_belong_to_seller() {
        let mut mocks = Mocks::new();
        mocks.parties_ok();
        mocks
            .products
            .expect_get(PRODUCT)
            .return_ok(Some(product(UserId(77), 5)));

        let err = mocks
            .service()
            .create_order(BUYER, SELLER, PRODUCT, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidInput(_)));
        mocks.verify();
    }

    #[tokio::test]
    async fn zero_quantity_touches_no_actor() {
        let mocks = Mocks::new();
        let err = mocks
            .service()
            .create_order(BUYER, SELLER, PRODUCT, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidInput(_)));
        mocks.verify();
    }

    #[tokio::test]
    async fn cancel_stands_when_release_fails() {
        let mut mocks = Mocks::new();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut cancelled = Order::open(
            OrderId(4),
            OrderCreate {
                buyer_id: BUYER,
                seller_id: SELLER,
                product_id: PRODUCT,
                quantity: 2,
                created_at: t0,
            },
        );
        cancelled.status = crate::model::OrderStatus::Cancelled;
        mocks.orders.expect_action(OrderId(4)).return_ok(cancelled);
        mocks
            .products
            .expect_action(PRODUCT)
            .return_err(FrameworkError::NotFound("product_1".into()));

        let order = mocks.service().cancel(OrderId(4), BUYER).await.unwrap();
        assert_eq!(order.status, crate::model::OrderStatus::Cancelled);
        mocks.verify();
    }
}
