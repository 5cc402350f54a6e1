//! # Expiry Sweeper
//!
//! Reclaims stock held by orders that were neither delivered nor cancelled
//! within the expiry deadline. Each run finds the stale `OPEN` orders, moves
//! each one to `EXPIRED` with a conditional transition, and releases its
//! quantity back to the product.
//!
//! Runs never overlap: the periodic loop awaits each run before the next
//! tick, and [`ExpirySweeper::sweep_once`] refuses to start while another
//! call is in flight.

use crate::clients::{OrderClient, ProductClient};
use crate::clock::SharedClock;
use crate::model::Order;
use crate::order_actor::OrderError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Stale open orders found.
    pub scanned: usize,
    /// Orders expired with their stock released.
    pub expired: usize,
    /// Orders that lost a race or whose release failed.
    pub failed: usize,
}

#[derive(Clone)]
pub struct ExpirySweeper {
    orders: OrderClient,
    products: ProductClient,
    clock: SharedClock,
    sweep_interval: Duration,
    order_expiry: chrono::TimeDelta,
    running: Arc<AtomicBool>,
}

/// Clears the single-flight flag when a run ends, however it ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ExpirySweeper {
    pub fn new(
        orders: OrderClient,
        products: ProductClient,
        clock: SharedClock,
        sweep_interval: Duration,
        order_expiry: Duration,
    ) -> Self {
        Self {
            orders,
            products,
            clock,
            sweep_interval,
            order_expiry: chrono::TimeDelta::from_std(order_expiry)
                .unwrap_or(chrono::TimeDelta::MAX),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs one sweep. Returns `None` without doing anything if a sweep is
    /// already in progress.
    pub async fn sweep_once(&self) -> Option<SweepReport> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Sweep already in progress, skipping");
            return None;
        }
        let _guard = RunGuard(&self.running);

        let mut report = SweepReport::default();
        let Some(cutoff) = self.clock.now().checked_sub_signed(self.order_expiry) else {
            warn!(
                expiry = %self.order_expiry,
                "Expiry reaches before the earliest timestamp, nothing to sweep"
            );
            return Some(report);
        };

        let stale = match self.orders.find_stale(cutoff).await {
            Ok(stale) => stale,
            Err(e) => {
                error!(error = %e, "Could not list stale orders");
                return Some(report);
            }
        };
        report.scanned = stale.len();

        for order in stale {
            if self.expire_one(&order, cutoff).await {
                report.expired += 1;
            } else {
                report.failed += 1;
            }
        }

        info!(
            scanned = report.scanned,
            expired = report.expired,
            failed = report.failed,
            "Processed {} orders",
            report.scanned
        );
        Some(report)
    }

    /// Expires one order and releases its stock. Each order is its own unit
    /// of work: a failure here is logged and does not stop the batch.
    async fn expire_one(&self, order: &Order, cutoff: chrono::DateTime<chrono::Utc>) -> bool {
        let expired = match self.orders.expire(order.id, cutoff).await {
            Ok(expired) => expired,
            Err(e @ OrderError::InvalidTransition { .. }) => {
                // Cancelled or delivered between the scan and now.
                debug!(order_id = %order.id, error = %e, "Order left OPEN before expiry");
                return false;
            }
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Could not expire order");
                return false;
            }
        };

        match self
            .products
            .release(expired.product_id, expired.quantity)
            .await
        {
            Ok(remaining) => {
                info!(
                    order_id = %expired.id,
                    product_id = %expired.product_id,
                    quantity = expired.quantity,
                    remaining,
                    "Order expired, stock released"
                );
                true
            }
            Err(e) => {
                error!(
                    order_id = %expired.id,
                    product_id = %expired.product_id,
                    quantity = expired.quantity,
                    error = %e,
                    "Order expired but stock release failed"
                );
                false
            }
        }
    }

    /// Starts the periodic loop on its own task. The first run happens one
    /// interval after start.
    pub fn spawn(self) -> SweeperHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let period = self.sweep_interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(interval_secs = period.as_secs(), "Expiry sweeper started");

            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        info!("Expiry sweeper stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        self.sweep_once().instrument(info_span!("sweep")).await;
                    }
                }
            }
        });

        SweeperHandle {
            stop: Some(stop_tx),
            task,
        }
    }
}

/// Owner of a running sweeper loop. Dropping it also stops the loop.
pub struct SweeperHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stops the loop after any in-flight run completes.
    pub async fn shutdown(mut self) -> Result<(), JoinError> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        (&mut self.task).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{OrderCreate, OrderId, OrderStatus, Product, ProductId, UserId};
    use actor_framework::mock::MockClient;
    use chrono::{TimeZone, Utc};

    fn stale_order(id: u32) -> Order {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Order::open(
            OrderId(id),
            OrderCreate {
                buyer_id: UserId(1),
                seller_id: UserId(2),
                product_id: ProductId(1),
                quantity: 1,
                created_at: t0,
            },
        )
    }

    fn sweeper(orders: &MockClient<Order>, products: &MockClient<Product>) -> ExpirySweeper {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ExpirySweeper::new(
            OrderClient::new(orders.client()),
            ProductClient::new(products.client()),
            Arc::new(ManualClock::new(now)),
            Duration::from_secs(300),
            Duration::from_secs(3600),
        )
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_batch() {
        let mut orders = MockClient::<Order>::new();
        let mut products = MockClient::<Product>::new();

        orders
            .expect_find()
            .return_ok(vec![stale_order(1), stale_order(2), stale_order(3)]);

        let mut expired = stale_order(1);
        expired.status = OrderStatus::Expired;
        orders.expect_action(OrderId(1)).return_ok(expired.clone());
        products.expect_action(ProductId(1)).return_ok(10);

        orders
            .expect_action(OrderId(2))
            .return_err(actor_framework::FrameworkError::EntityError(Box::new(
                OrderError::InvalidTransition {
                    order: "order_2".into(),
                    from: OrderStatus::Cancelled,
                    event: crate::model::OrderEvent::Expire,
                },
            )));

        let mut third = expired;
        third.id = OrderId(3);
        orders.expect_action(OrderId(3)).return_ok(third);
        products
            .expect_action(ProductId(1))
            .return_err(actor_framework::FrameworkError::ActorClosed);

        let report = sweeper(&orders, &products).sweep_once().await.unwrap();
        assert_eq!(
            report,
            SweepReport {
                scanned: 3,
                expired: 1,
                failed: 2
            }
        );
        orders.verify();
        products.verify();
    }

    #[tokio::test]
    async fn overlapping_sweep_is_skipped() {
        let orders = MockClient::<Order>::new();
        let products = MockClient::<Product>::new();
        let sweeper = sweeper(&orders, &products);

        sweeper.running.store(true, Ordering::Release);
        assert_eq!(sweeper.clone().sweep_once().await, None);

        sweeper.running.store(false, Ordering::Release);
        let mut orders = orders;
        orders.expect_find().return_ok(Vec::new());
        assert_eq!(sweeper.sweep_once().await, Some(SweepReport::default()));
        assert!(!sweeper.running.load(Ordering::Acquire));
        orders.verify();
    }

    #[tokio::test]
    async fn out_of_range_expiry_sweeps_nothing() {
        let orders = MockClient::<Order>::new();
        let products = MockClient::<Product>::new();
        let sweeper = ExpirySweeper::new(
            OrderClient::new(orders.client()),
            ProductClient::new(products.client()),
            Arc::new(ManualClock::new(Utc::now())),
            Duration::from_secs(300),
            Duration::from_secs(u64::MAX),
        );

        assert_eq!(sweeper.sweep_once().await, Some(SweepReport::default()));
        orders.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn loop_waits_one_interval_and_stops_on_shutdown() {
        let mut orders = MockClient::<Order>::new();
        let products = MockClient::<Product>::new();
        orders.expect_find().return_ok(Vec::new());

        let handle = sweeper(&orders, &products).spawn();

        tokio::time::sleep(Duration::from_secs(299)).await;
        tokio::task::yield_now().await;
        let pending = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| orders.verify()));
        assert!(pending.is_err(), "no sweep before the first interval");

        tokio::time::sleep(Duration::from_secs(2)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        orders.verify();

        handle.shutdown().await.unwrap();
    }
}
