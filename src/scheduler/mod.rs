//! Drives a run: timed placements and randomized pickups.
//!
//! Order `i` is placed at `start + i × rate`. Once its placement has been
//! answered, it is picked up after its own delay drawn from `[min, max]`.
//! Every order runs as one task; the run ends when all of them have made
//! their pickup attempt.

use crate::clients::KitchenClient;
use crate::config::KitchenConfig;
use crate::manager::KitchenError;
use crate::model::{Action, Order};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, info, info_span, warn, Instrument};

#[derive(Debug)]
pub struct Scheduler {
    client: KitchenClient,
    rate: Duration,
    min_pickup: Duration,
    max_pickup: Duration,
    rng: StdRng,
}

/// Completion bookkeeping shared by all order tasks.
#[derive(Debug, Default)]
struct Progress {
    processed: AtomicUsize,
    done: Notify,
    first_error: Mutex<Option<KitchenError>>,
}

impl Progress {
    fn fail(&self, error: KitchenError) {
        let mut slot = self.first_error.lock();
        if slot.is_none() {
            *slot = Some(error);
        }
    }

    fn finish_one(&self) {
        self.processed.fetch_add(1, Ordering::SeqCst);
        self.done.notify_one();
    }
}

impl Scheduler {
    /// `seed` makes the pickup delays reproducible; `None` draws from the OS.
    pub fn new(
        client: KitchenClient,
        rate: Duration,
        min_pickup: Duration,
        max_pickup: Duration,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            client,
            rate,
            min_pickup,
            max_pickup,
            rng,
        }
    }

    pub fn from_config(client: KitchenClient, config: &KitchenConfig) -> Self {
        let (min, max) = config.pickup_window();
        Self::new(client, config.rate(), min, max, config.effective_seed())
    }

    /// Schedules every order, waits for all pickup attempts and returns the
    /// kitchen's full history.
    ///
    /// The first error any order task hits is returned instead.
    pub async fn run(&mut self, orders: Vec<Order>) -> Result<Vec<Action>, KitchenError> {
        let total = orders.len();
        info!(total, rate = ?self.rate, "Scheduler started");

        let progress = Arc::new(Progress::default());
        let start = Instant::now();

        for (index, order) in orders.into_iter().enumerate() {
            let delay = self.pickup_delay();
            let slot = u32::try_from(index).unwrap_or(u32::MAX);
            let at = start + self.rate.saturating_mul(slot);
            let client = self.client.clone();
            let progress = progress.clone();
            let span = info_span!("order", order_id = %order.id);

            tokio::spawn(
                async move {
                    if let Err(e) = place_then_pickup(&client, order, at, delay).await {
                        warn!(error = %e, "Order task failed");
                        progress.fail(e);
                    }
                    progress.finish_one();
                }
                .instrument(span),
            );
        }

        loop {
            let processed = progress.processed.load(Ordering::SeqCst);
            if processed >= total {
                break;
            }
            debug!(processed, total, "Waiting for pickups");
            progress.done.notified().await;
        }

        if let Some(error) = progress.first_error.lock().take() {
            return Err(error);
        }

        let history = self.client.history().await?;
        info!(actions = history.len(), "Scheduler finished");
        Ok(history)
    }

    fn pickup_delay(&mut self) -> Duration {
        let min = millis(self.min_pickup);
        let max = millis(self.max_pickup);
        if min >= max {
            return self.min_pickup;
        }
        Duration::from_millis(self.rng.random_range(min..=max))
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

async fn place_then_pickup(
    client: &KitchenClient,
    order: Order,
    at: Instant,
    delay: Duration,
) -> Result<(), KitchenError> {
    sleep_until(at).await;
    let id = order.id.clone();
    client.place(order).await?;

    debug!(delay_ms = millis(delay), "Pickup scheduled");
    sleep(delay).await;
    if client.pickup(&id).await?.is_none() {
        debug!("Order was gone before pickup");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::mock::{create_mock_client, expect_history, expect_pickup, expect_place};
    use crate::model::{ActionKind, Temperature};

    #[tokio::test(start_paused = true)]
    async fn test_place_then_pickup_within_window() {
        let (client, mut receiver) = create_mock_client(10);
        let mut scheduler = Scheduler::new(
            client,
            Duration::from_millis(500),
            Duration::from_secs(4),
            Duration::from_secs(8),
            Some(7),
        );

        let run = tokio::spawn(async move {
            scheduler
                .run(vec![Order::new("o1", "Soup", Temperature::Hot, 60)])
                .await
        });

        let (order, responder) = expect_place(&mut receiver).await.expect("Expected Place request");
        let placed_at = Instant::now();
        assert_eq!(order.id, "o1");
        responder.send(Ok(Action::new(1, "o1", ActionKind::Place))).unwrap();

        let (id, responder) = expect_pickup(&mut receiver).await.expect("Expected Pickup request");
        let waited = placed_at.elapsed();
        assert_eq!(id, "o1");
        assert!(waited >= Duration::from_secs(4), "picked up too early: {waited:?}");
        assert!(waited <= Duration::from_millis(8_010), "picked up too late: {waited:?}");
        responder.send(Ok(Some(order))).unwrap();

        let (filter, responder) = expect_history(&mut receiver).await.expect("Expected History request");
        assert_eq!(filter, None);
        let history = vec![
            Action::new(1, "o1", ActionKind::Place),
            Action::new(2, "o1", ActionKind::Pickup),
        ];
        responder.send(Ok(history.clone())).unwrap();

        assert_eq!(run.await.unwrap(), Ok(history));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pickup_delay_counts_from_placement() {
        let (client, mut receiver) = create_mock_client(10);
        let mut scheduler = Scheduler::new(
            client,
            Duration::from_millis(500),
            Duration::from_secs(4),
            Duration::from_secs(8),
            Some(11),
        );
        let start = Instant::now();

        tokio::spawn(async move {
            scheduler
                .run(vec![Order::new("o1", "Soup", Temperature::Hot, 60)])
                .await
        });

        let (order, responder) = expect_place(&mut receiver).await.expect("Expected Place request");
        // a slow kitchen answers the placement three seconds late
        sleep(Duration::from_secs(3)).await;
        let answered_at = Instant::now();
        responder.send(Ok(Action::new(1, "o1", ActionKind::Place))).unwrap();

        let (_, responder) = expect_pickup(&mut receiver).await.expect("Expected Pickup request");
        let since_answer = answered_at.elapsed();
        assert!(
            since_answer >= Duration::from_secs(4),
            "pickup {since_answer:?} after placement, {:?} after start",
            start.elapsed()
        );
        assert!(start.elapsed() >= Duration::from_secs(7));
        responder.send(Ok(Some(order))).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_placements_follow_rate() {
        let (client, mut receiver) = create_mock_client(10);
        let mut scheduler = Scheduler::new(
            client,
            Duration::from_millis(500),
            Duration::from_secs(4),
            Duration::from_secs(8),
            Some(1),
        );
        let start = Instant::now();

        let orders = vec![
            Order::new("o0", "Soup", Temperature::Hot, 60),
            Order::new("o1", "Salad", Temperature::Cold, 60),
            Order::new("o2", "Bread", Temperature::Room, 60),
        ];
        tokio::spawn(async move { scheduler.run(orders).await });

        for index in 0..3u32 {
            let (order, responder) = expect_place(&mut receiver).await.expect("Expected Place request");
            assert_eq!(order.id, format!("o{index}"));
            let due = Duration::from_millis(500) * index;
            let elapsed = start.elapsed();
            assert!(elapsed >= due && elapsed < due + Duration::from_millis(10), "o{index} placed at {elapsed:?}");
            responder.send(Ok(Action::new(0, order.id, ActionKind::Place))).unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_ends_run() {
        let (client, mut receiver) = create_mock_client(10);
        let mut scheduler = Scheduler::new(
            client,
            Duration::from_millis(500),
            Duration::from_secs(4),
            Duration::from_secs(8),
            Some(3),
        );

        let run = tokio::spawn(async move {
            scheduler
                .run(vec![Order::new("o1", "Soup", Temperature::Hot, 60)])
                .await
        });

        let (_, responder) = expect_place(&mut receiver).await.expect("Expected Place request");
        let broken = KitchenError::InvariantViolation("shelf still full".to_string());
        responder.send(Err(broken.clone())).unwrap();

        assert_eq!(run.await.unwrap(), Err(broken));
    }

    #[tokio::test]
    async fn test_empty_run_only_reads_history() {
        let (client, mut receiver) = create_mock_client(10);
        let mut scheduler = Scheduler::new(
            client,
            Duration::from_millis(500),
            Duration::from_secs(4),
            Duration::from_secs(8),
            None,
        );

        let run = tokio::spawn(async move { scheduler.run(Vec::new()).await });

        let (_, responder) = expect_history(&mut receiver).await.expect("Expected History request");
        responder.send(Ok(Vec::new())).unwrap();
        assert_eq!(run.await.unwrap(), Ok(Vec::new()));
    }

    #[test]
    fn test_seeded_delays_repeat() {
        let (client, _receiver) = create_mock_client(1);
        let draw = |seed| {
            let mut scheduler = Scheduler::new(
                client.clone(),
                Duration::from_millis(500),
                Duration::from_secs(4),
                Duration::from_secs(8),
                Some(seed),
            );
            (0..5).map(|_| scheduler.pickup_delay()).collect::<Vec<_>>()
        };

        let first = draw(42);
        assert_eq!(first, draw(42));
        assert!(first
            .iter()
            .all(|d| *d >= Duration::from_secs(4) && *d <= Duration::from_secs(8)));
    }
}
