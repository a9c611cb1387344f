use crate::config::KitchenConfig;
use crate::eviction::DiscardPolicy;
use crate::events::EventSink;
use crate::freshness::{Clock, FreshnessTracker};
use crate::manager::KitchenError;
use crate::model::{Action, ActionKind, Order, StorageKind};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Owns every state transition of the holding area.
///
/// An order goes `absent → placed → (moved)* → picked up | discarded`. Each
/// successful transition emits exactly one [`Action`] to the sink.
///
/// Mutating operations take `&mut self`: whoever owns the manager is the
/// single writer. In this crate that is the
/// [`KitchenActor`](crate::actor::KitchenActor), which processes requests one
/// at a time.
#[derive(Debug)]
pub struct OrderManager {
    storage: Storage,
    tracker: FreshnessTracker,
    policy: DiscardPolicy,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
}

impl OrderManager {
    pub fn new(storage: Storage, policy: DiscardPolicy, sink: Arc<dyn EventSink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            tracker: FreshnessTracker::new(clock.clone()),
            policy,
            sink,
            clock,
        }
    }

    /// Validates `config` and builds a manager with its capacities and policy.
    pub fn from_config(
        config: &KitchenConfig,
        sink: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, KitchenError> {
        config.validate()?;
        let storage = Storage::new(config.heater_capacity, config.cooler_capacity, config.shelf_capacity)?;
        Ok(Self::new(storage, config.discard_policy(), sink, clock))
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn tracker(&self) -> &FreshnessTracker {
        &self.tracker
    }

    pub fn policy(&self) -> DiscardPolicy {
        self.policy
    }

    /// Places a new order.
    ///
    /// Tries, in order:
    /// 1. the order's ideal compartment;
    /// 2. the shelf;
    /// 3. one rebalancing move off the shelf (hot orders before cold), then the shelf;
    /// 4. discarding the policy's victim from the shelf, then the shelf.
    ///
    /// Only step 4 can fail, and only if the manager's own invariants are broken.
    #[instrument(skip(self, order), fields(order_id = %order.id, temp = %order.temp))]
    pub fn place(&mut self, order: Order) -> Result<Action, KitchenError> {
        debug!(?order, "place called");

        let ideal = self.storage.ideal_compartment_for(&order).kind();
        if self.storage.store(order.clone(), ideal) {
            return Ok(self.placed(order, ideal));
        }

        if self.storage.shelf().has_capacity() && self.storage.store(order.clone(), StorageKind::Shelf) {
            return Ok(self.placed(order, StorageKind::Shelf));
        }

        if self.rebalance_shelf()?
            && self.storage.shelf().has_capacity()
            && self.storage.store(order.clone(), StorageKind::Shelf)
        {
            return Ok(self.placed(order, StorageKind::Shelf));
        }

        let candidates = self.storage.shelf().all();
        let victim = self
            .policy
            .select_victim(&candidates, self.storage.shelf(), &self.tracker)?;
        info!(victim = %victim, policy = %self.policy, "Shelf full, discarding");
        self.discard(&victim);

        if self.storage.store(order.clone(), StorageKind::Shelf) {
            return Ok(self.placed(order, StorageKind::Shelf));
        }

        error!(victim = %victim, "Shelf still full after discard");
        Err(KitchenError::InvariantViolation(format!(
            "no room for order {} after discarding {}",
            order.id, victim
        )))
    }

    /// Moves an order between compartments, re-tracking it at the target temperature.
    ///
    /// Returns `Ok(false)` and emits nothing if the order is not in `source`
    /// or `target` is full.
    pub fn move_order(&mut self, id: &str, source: StorageKind, target: StorageKind) -> Result<bool, KitchenError> {
        if !self.storage.move_order(id, source, target)? {
            debug!(order_id = %id, %source, %target, "Move refused");
            return Ok(false);
        }

        if let Some(order) = self.storage.compartment(target).get(id) {
            self.tracker.track(order, target.temperature());
        }
        info!(order_id = %id, from = %source, to = %target, "Moved");
        self.emit(id, ActionKind::Move);
        Ok(true)
    }

    /// Hands an order to its courier. `None` if the order is not in the kitchen.
    pub fn pickup(&mut self, id: &str) -> Option<Order> {
        let held_at = self.storage.locate(id)?.temperature();
        if self.tracker.is_expired(id, held_at) {
            warn!(order_id = %id, "Picked up after freshness expired");
        }

        let order = self.storage.remove(id)?;
        self.tracker.stop_tracking(id);
        info!(order_id = %id, "Picked up");
        self.emit(id, ActionKind::Pickup);
        Some(order)
    }

    /// Throws an order away. `false` if the order is not in the kitchen.
    pub fn discard(&mut self, id: &str) -> bool {
        if self.storage.remove(id).is_none() {
            return false;
        }
        self.tracker.stop_tracking(id);
        info!(order_id = %id, "Discarded");
        self.emit(id, ActionKind::Discard);
        true
    }

    pub fn exists(&self, id: &str) -> bool {
        self.storage.locate(id).is_some()
    }

    pub fn location_of(&self, id: &str) -> Option<StorageKind> {
        self.storage.locate(id).map(|compartment| compartment.kind())
    }

    pub fn history(&self) -> Vec<Action> {
        self.sink.history()
    }

    pub fn history_for(&self, id: &str) -> Vec<Action> {
        self.sink.history_for(id)
    }

    fn placed(&mut self, order: Order, kind: StorageKind) -> Action {
        let id = order.id.clone();
        self.tracker.track(order, kind.temperature());
        info!(order_id = %id, compartment = %kind, "Placed");
        self.emit(&id, ActionKind::Place)
    }

    /// Frees a shelf slot by moving one order to its ideal compartment.
    ///
    /// Hot orders are considered before cold ones, and at most one order moves.
    fn rebalance_shelf(&mut self) -> Result<bool, KitchenError> {
        let shelf_orders = self.storage.shelf().all();

        for target in [StorageKind::Heater, StorageKind::Cooler] {
            if !self.storage.compartment(target).has_capacity() {
                continue;
            }
            let wanted = target.temperature();
            let candidate = shelf_orders.values().find(|order| order.temp == wanted);
            if let Some(order) = candidate {
                debug!(order_id = %order.id, %target, "Rebalancing shelf");
                return self.move_order(&order.id, StorageKind::Shelf, target);
            }
        }
        Ok(false)
    }

    fn emit(&self, id: &str, kind: ActionKind) -> Action {
        let action = Action::new(self.clock.now_micros(), id, kind);
        self.sink.record(action.clone());
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ActionLog;
    use crate::freshness::ManualClock;
    use crate::model::Temperature;
    use std::time::Duration;

    struct Fixture {
        manager: OrderManager,
        log: Arc<ActionLog>,
        clock: Arc<ManualClock>,
    }

    fn fixture(heater: usize, cooler: usize, shelf: usize) -> Fixture {
        let log = Arc::new(ActionLog::new());
        let clock = Arc::new(ManualClock::new(1_000_000));
        let storage = Storage::new(heater, cooler, shelf).unwrap();
        let manager = OrderManager::new(storage, DiscardPolicy::default(), log.clone(), clock.clone());
        Fixture { manager, log, clock }
    }

    fn order(id: &str, temp: Temperature) -> Order {
        Order::new(id, "Meal", temp, 120)
    }

    fn events(log: &ActionLog) -> Vec<(String, ActionKind)> {
        log.history().into_iter().map(|a| (a.order_id, a.kind)).collect()
    }

    fn ev(id: &str, kind: ActionKind) -> (String, ActionKind) {
        (id.to_string(), kind)
    }

    #[test]
    fn test_place_into_ideal_compartment() {
        let mut f = fixture(2, 2, 2);
        let action = f.manager.place(order("h1", Temperature::Hot)).unwrap();

        assert_eq!(action.kind, ActionKind::Place);
        assert_eq!(action.order_id, "h1");
        assert_eq!(action.timestamp, 1_000_000);
        assert_eq!(f.manager.location_of("h1"), Some(StorageKind::Heater));
        assert_eq!(events(&f.log), vec![ev("h1", ActionKind::Place)]);
    }

    #[test]
    fn test_place_overflows_to_shelf_at_room_temperature() {
        let mut f = fixture(1, 1, 2);
        f.manager.place(order("h1", Temperature::Hot)).unwrap();
        f.manager.place(order("h2", Temperature::Hot)).unwrap();

        assert_eq!(f.manager.location_of("h2"), Some(StorageKind::Shelf));
        f.clock.advance(Duration::from_secs(30));
        let freshness = f.manager.tracker().normalized_freshness_values();
        assert!((freshness["h1"] - 0.75).abs() < 1e-9);
        assert!((freshness["h2"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rebalance_moves_hot_before_cold() {
        let mut f = fixture(1, 1, 2);
        f.manager.place(order("h0", Temperature::Hot)).unwrap();
        f.manager.place(order("c0", Temperature::Cold)).unwrap();
        f.manager.place(order("z-hot", Temperature::Hot)).unwrap();
        f.manager.place(order("a-cold", Temperature::Cold)).unwrap();
        f.manager.pickup("h0").unwrap();
        f.manager.pickup("c0").unwrap();

        f.manager.place(order("r1", Temperature::Room)).unwrap();

        assert_eq!(f.manager.location_of("z-hot"), Some(StorageKind::Heater));
        assert_eq!(f.manager.location_of("a-cold"), Some(StorageKind::Shelf));
        assert_eq!(f.manager.location_of("r1"), Some(StorageKind::Shelf));
        let tail: Vec<_> = events(&f.log).into_iter().skip(6).collect();
        assert_eq!(tail, vec![ev("z-hot", ActionKind::Move), ev("r1", ActionKind::Place)]);
    }

    #[test]
    fn test_rebalance_moves_cold_when_heater_full() {
        let mut f = fixture(1, 1, 2);
        f.manager.place(order("h0", Temperature::Hot)).unwrap();
        f.manager.place(order("c0", Temperature::Cold)).unwrap();
        f.manager.place(order("h1", Temperature::Hot)).unwrap();
        f.manager.place(order("c1", Temperature::Cold)).unwrap();
        f.manager.pickup("c0").unwrap();

        f.manager.place(order("h2", Temperature::Hot)).unwrap();

        assert_eq!(f.manager.location_of("c1"), Some(StorageKind::Cooler));
        assert_eq!(f.manager.location_of("h1"), Some(StorageKind::Shelf));
        assert_eq!(f.manager.location_of("h2"), Some(StorageKind::Shelf));
        assert!(!events(&f.log).iter().any(|(_, kind)| *kind == ActionKind::Discard));
    }

    #[test]
    fn test_full_kitchen_discards_before_placing() {
        let mut f = fixture(1, 1, 1);
        f.manager.place(order("hot1", Temperature::Hot)).unwrap();
        f.manager.place(order("cold1", Temperature::Cold)).unwrap();
        f.manager.place(order("room1", Temperature::Room)).unwrap();
        assert_eq!(f.log.len(), 3);

        f.manager.place(order("room2", Temperature::Room)).unwrap();

        assert_eq!(
            events(&f.log),
            vec![
                ev("hot1", ActionKind::Place),
                ev("cold1", ActionKind::Place),
                ev("room1", ActionKind::Place),
                ev("room1", ActionKind::Discard),
                ev("room2", ActionKind::Place),
            ]
        );
        assert!(!f.manager.exists("room1"));
        assert!(!f.manager.tracker().is_tracked("room1"));
        assert_eq!(f.manager.location_of("room2"), Some(StorageKind::Shelf));
    }

    #[test]
    fn test_pickup_is_idempotent() {
        let mut f = fixture(1, 1, 1);
        f.manager.place(order("c1", Temperature::Cold)).unwrap();

        assert_eq!(f.manager.pickup("c1").map(|o| o.id), Some("c1".to_string()));
        let logged = f.log.len();
        assert!(f.manager.pickup("c1").is_none());
        assert!(!f.manager.discard("c1"));
        assert_eq!(f.log.len(), logged);
        assert!(!f.manager.tracker().is_tracked("c1"));
        assert_eq!(f.manager.history_for("c1").len(), 2);
    }

    #[test]
    fn test_move_retracks_and_emits() {
        let mut f = fixture(1, 1, 2);
        f.manager.place(order("h1", Temperature::Hot)).unwrap();
        f.manager.place(order("h2", Temperature::Hot)).unwrap();
        f.manager.pickup("h1").unwrap();

        assert_eq!(f.manager.move_order("h2", StorageKind::Shelf, StorageKind::Heater), Ok(true));
        assert_eq!(f.manager.location_of("h2"), Some(StorageKind::Heater));
        assert_eq!(f.log.history().last().map(|a| a.kind), Some(ActionKind::Move));

        f.clock.advance(Duration::from_secs(60));
        let freshness = f.manager.tracker().normalized_freshness_values();
        assert!((freshness["h2"] - 0.5).abs() < 1e-9);

        let logged = f.log.len();
        assert_eq!(f.manager.move_order("h2", StorageKind::Shelf, StorageKind::Heater), Ok(false));
        assert_eq!(f.manager.move_order("nope", StorageKind::Shelf, StorageKind::Cooler), Ok(false));
        assert_eq!(f.log.len(), logged);
    }

    #[test]
    fn test_location_matches_storage_after_every_place() {
        let mut f = fixture(2, 2, 3);
        let temps = [Temperature::Hot, Temperature::Cold, Temperature::Room];
        for i in 0..20 {
            let id = format!("o{i:02}");
            f.manager.place(order(&id, temps[i % 3])).unwrap();
            f.clock.advance(Duration::from_secs(1));

            let kind = f.manager.location_of(&id).expect("placed order must be stored");
            assert!(f.manager.storage().compartment(kind).contains(&id));

            for kind in StorageKind::ALL {
                let compartment = f.manager.storage().compartment(kind);
                assert!(compartment.len() <= compartment.capacity());
            }
        }

        for i in 0..20 {
            let id = format!("o{i:02}");
            let owners = StorageKind::ALL
                .into_iter()
                .filter(|kind| f.manager.storage().compartment(*kind).contains(&id))
                .count();
            assert!(owners <= 1);
        }
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = KitchenConfig { cooler_capacity: 0, ..Default::default() };
        let result = OrderManager::from_config(&config, Arc::new(ActionLog::new()), Arc::new(ManualClock::new(0)));
        assert!(matches!(result, Err(KitchenError::InvalidConfiguration(_))));
    }
}
