use crate::model::Temperature;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A food order waiting to be picked up.
///
/// The JSON shape matches the order feed: `{"id", "name", "temp", "freshness"}`
/// with `freshness` in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub name: String,
    pub temp: Temperature,
    pub freshness: u64,
}

impl Order {
    /// Creates a new Order.
    ///
    /// # Arguments
    /// * `id` - Unique order identifier
    /// * `name` - Display name of the dish
    /// * `temp` - Ideal holding temperature
    /// * `freshness` - Nominal shelf life in seconds at the ideal temperature
    pub fn new(id: impl Into<String>, name: impl Into<String>, temp: Temperature, freshness: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            temp,
            freshness,
        }
    }

    /// Nominal shelf life as a `Duration`.
    pub fn shelf_life(&self) -> Duration {
        Duration::from_secs(self.freshness)
    }
}
