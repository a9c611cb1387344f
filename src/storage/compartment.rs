use crate::model::{Order, StorageKind, Temperature};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// A fixed-capacity collection of orders held at one temperature.
///
/// Orders are keyed by id in an ordered map, so snapshots iterate in
/// lexicographic id order. The capacity check and the insert happen under
/// the same lock: `len() <= capacity()` holds under concurrent stores.
#[derive(Debug)]
pub struct Compartment {
    kind: StorageKind,
    capacity: usize,
    orders: Mutex<BTreeMap<String, Order>>,
}

impl Compartment {
    pub(crate) fn new(kind: StorageKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            orders: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn kind(&self) -> StorageKind {
        self.kind
    }

    pub fn temperature(&self) -> Temperature {
        self.kind.temperature()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.orders.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.lock().is_empty()
    }

    pub fn has_capacity(&self) -> bool {
        self.len() < self.capacity
    }

    /// Inserts the order unless the compartment is full.
    ///
    /// Returns `false` without touching the contents when full.
    pub(crate) fn store(&self, order: Order) -> bool {
        let mut orders = self.orders.lock();
        if orders.len() >= self.capacity {
            return false;
        }
        orders.insert(order.id.clone(), order);
        true
    }

    pub(crate) fn remove(&self, id: &str) -> Option<Order> {
        self.orders.lock().remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.orders.lock().contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders.lock().get(id).cloned()
    }

    /// Copy of the current contents, safe to iterate while the compartment changes.
    pub fn all(&self) -> BTreeMap<String, Order> {
        self.orders.lock().clone()
    }
}
