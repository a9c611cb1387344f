use crate::model::{Order, StorageKind};
use crate::storage::{Compartment, StorageError};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, warn};

/// The holding area: a heater, a cooler and a shelf.
///
/// # Location index
/// `locations` maps an order id to the compartment it was last stored in. It is
/// a hint, not the source of truth: [`Storage::locate`] confirms membership
/// before trusting it and falls back to probing every compartment when the
/// hint is missing or stale.
///
/// # Locking
/// Single-compartment operations (`store`, `remove`) rely on the compartment's
/// own lock and may run concurrently for different ids. `move_order` spans two
/// compartments and takes `structure` exclusively for its whole sequence; the
/// fallback probe in `locate` takes it shared so it never observes an order
/// halfway through a move.
#[derive(Debug)]
pub struct Storage {
    heater: Compartment,
    cooler: Compartment,
    shelf: Compartment,
    locations: RwLock<HashMap<String, StorageKind>>,
    structure: RwLock<()>,
}

impl Storage {
    /// Default capacities: heater 6, cooler 6, shelf 12.
    pub const DEFAULT_CAPACITIES: (usize, usize, usize) = (6, 6, 12);

    /// Creates the holding area, rejecting any compartment without room.
    pub fn new(heater_capacity: usize, cooler_capacity: usize, shelf_capacity: usize) -> Result<Self, StorageError> {
        for (kind, capacity) in [
            (StorageKind::Heater, heater_capacity),
            (StorageKind::Cooler, cooler_capacity),
            (StorageKind::Shelf, shelf_capacity),
        ] {
            if capacity == 0 {
                return Err(StorageError::InvalidCapacity { kind, capacity });
            }
        }

        Ok(Self::build(heater_capacity, cooler_capacity, shelf_capacity))
    }

    fn build(heater_capacity: usize, cooler_capacity: usize, shelf_capacity: usize) -> Self {
        Self {
            heater: Compartment::new(StorageKind::Heater, heater_capacity),
            cooler: Compartment::new(StorageKind::Cooler, cooler_capacity),
            shelf: Compartment::new(StorageKind::Shelf, shelf_capacity),
            locations: RwLock::new(HashMap::new()),
            structure: RwLock::new(()),
        }
    }

    pub fn compartment(&self, kind: StorageKind) -> &Compartment {
        match kind {
            StorageKind::Heater => &self.heater,
            StorageKind::Cooler => &self.cooler,
            StorageKind::Shelf => &self.shelf,
        }
    }

    pub fn shelf(&self) -> &Compartment {
        &self.shelf
    }

    /// The compartment matching the order's ideal temperature.
    pub fn ideal_compartment_for(&self, order: &Order) -> &Compartment {
        self.compartment(order.temp.storage_kind())
    }

    /// Finds the compartment currently holding `id`.
    pub fn locate(&self, id: &str) -> Option<&Compartment> {
        let hint = self.locations.read().get(id).copied();
        if let Some(kind) = hint {
            let compartment = self.compartment(kind);
            if compartment.contains(id) {
                return Some(compartment);
            }
            debug!(order_id = %id, hint = %kind, "Stale location hint");
        }

        let _guard = self.structure.read();
        StorageKind::ALL
            .into_iter()
            .map(|kind| self.compartment(kind))
            .find(|compartment| compartment.contains(id))
    }

    /// Stores the order in the given compartment and records its location.
    pub fn store(&self, order: Order, kind: StorageKind) -> bool {
        let id = order.id.clone();
        let stored = self.compartment(kind).store(order);
        if stored {
            self.locations.write().insert(id, kind);
        }
        stored
    }

    /// Removes the order from whichever compartment holds it.
    pub fn remove(&self, id: &str) -> Option<Order> {
        let compartment = self.locate(id)?;
        let removed = compartment.remove(id);
        if removed.is_some() {
            self.locations.write().remove(id);
        }
        removed
    }

    /// Moves an order between compartments.
    ///
    /// Returns `Ok(false)` when the order is not in `source` or `target` is
    /// full. If the store into `target` fails after the order left `source`, the
    /// order is put back; a failed put-back is an invariant violation.
    pub fn move_order(&self, id: &str, source: StorageKind, target: StorageKind) -> Result<bool, StorageError> {
        let _guard = self.structure.write();
        let from = self.compartment(source);
        let to = self.compartment(target);

        if !from.contains(id) || !to.has_capacity() {
            return Ok(false);
        }
        let Some(order) = from.remove(id) else {
            return Ok(false);
        };
        self.transfer(order, from, to)
    }

    /// Second half of a move: `order` has already left `from`.
    ///
    /// Stores it in `to`, or puts it back into `from` if `to` filled up in the
    /// meantime. Caller holds `structure` exclusively.
    fn transfer(&self, order: Order, from: &Compartment, to: &Compartment) -> Result<bool, StorageError> {
        let id = order.id.clone();
        if to.store(order.clone()) {
            self.locations.write().insert(id, to.kind());
            return Ok(true);
        }

        warn!(order_id = %id, source = %from.kind(), target = %to.kind(), "Move target filled up, rolling back");
        if from.store(order) {
            self.locations.write().insert(id, from.kind());
            Ok(false)
        } else {
            self.locations.write().remove(&id);
            Err(StorageError::RollbackFailed { order_id: id })
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        let (heater, cooler, shelf) = Self::DEFAULT_CAPACITIES;
        Self::build(heater, cooler, shelf)
    }
}
