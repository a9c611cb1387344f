use crate::freshness::Clock;
use crate::model::{Order, Temperature, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// A tracked order: the order, where it is held now, and when it was placed.
#[derive(Debug, Clone)]
struct TrackedOrder {
    order: Order,
    stored_at: Temperature,
    placed_at: Timestamp,
}

impl TrackedOrder {
    /// Shelf life at `temperature`: nominal when it matches the ideal, halved otherwise.
    fn effective_life(&self, temperature: Temperature) -> Duration {
        let nominal = self.order.shelf_life();
        if temperature == self.order.temp {
            nominal
        } else {
            nominal / 2
        }
    }

    fn remaining(&self, temperature: Temperature, now: Timestamp) -> Duration {
        let elapsed = Duration::from_micros(u64::try_from(now.saturating_sub(self.placed_at)).unwrap_or(0));
        self.effective_life(temperature).saturating_sub(elapsed)
    }

    fn normalized(&self, now: Timestamp) -> f64 {
        let total = self.effective_life(self.stored_at);
        if total.is_zero() {
            return 0.0;
        }
        let remaining = self.remaining(self.stored_at, now);
        (remaining.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Keeps track of every order currently in the kitchen and computes its freshness.
///
/// The placement instant is taken from the clock the first time an order is
/// tracked. Re-tracking (after a move) only updates the holding temperature.
#[derive(Debug)]
pub struct FreshnessTracker {
    clock: Arc<dyn Clock>,
    tracked: HashMap<String, TrackedOrder>,
}

impl FreshnessTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            tracked: HashMap::new(),
        }
    }

    /// Starts tracking `order` at `stored_at`, or updates its temperature if already tracked.
    pub fn track(&mut self, order: Order, stored_at: Temperature) {
        let now = self.clock.now_micros();
        self.tracked
            .entry(order.id.clone())
            .and_modify(|entry| entry.stored_at = stored_at)
            .or_insert(TrackedOrder {
                order,
                stored_at,
                placed_at: now,
            });
    }

    pub fn stop_tracking(&mut self, id: &str) {
        self.tracked.remove(id);
    }

    pub fn is_tracked(&self, id: &str) -> bool {
        self.tracked.contains_key(id)
    }

    /// Remaining shelf life if the order is held at `current`; zero when untracked.
    pub fn remaining_freshness(&self, id: &str, current: Temperature) -> Duration {
        let now = self.clock.now_micros();
        self.tracked
            .get(id)
            .map(|entry| entry.remaining(current, now))
            .unwrap_or_default()
    }

    /// Untracked orders count as expired.
    pub fn is_expired(&self, id: &str, current: Temperature) -> bool {
        self.remaining_freshness(id, current).is_zero()
    }

    /// Freshness of every tracked order in `[0, 1]`, each at its own holding temperature.
    pub fn normalized_freshness_values(&self) -> HashMap<String, f64> {
        let now = self.clock.now_micros();
        self.tracked
            .iter()
            .map(|(id, entry)| (id.clone(), entry.normalized(now)))
            .collect()
    }

    /// Tracked orders, least remaining life at `temperature` first; ties by id.
    pub fn orders_by_freshness_ascending(&self, temperature: Temperature) -> Vec<Order> {
        let now = self.clock.now_micros();
        let mut entries: Vec<_> = self
            .tracked
            .values()
            .map(|entry| (entry.remaining(temperature, now), entry))
            .collect();
        entries.sort_by(|(a_left, a), (b_left, b)| a_left.cmp(b_left).then_with(|| a.order.id.cmp(&b.order.id)));
        entries.into_iter().map(|(_, entry)| entry.order.clone()).collect()
    }
}
