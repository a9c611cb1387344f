//! Kitchen configuration: capacities, timing and discard strategy.

use crate::eviction::DiscardPolicy;
use crate::manager::KitchenError;
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Name of a discard strategy as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyName {
    Freshness,
    Temperature,
    #[default]
    Composite,
}

impl Display for StrategyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StrategyName::Freshness => "freshness",
            StrategyName::Temperature => "temperature",
            StrategyName::Composite => "composite",
        };
        f.write_str(name)
    }
}

impl FromStr for StrategyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "freshness" => Ok(StrategyName::Freshness),
            "temperature" => Ok(StrategyName::Temperature),
            "composite" => Ok(StrategyName::Composite),
            other => Err(format!("Unknown discard strategy: {other} (expected freshness, temperature or composite)")),
        }
    }
}

/// Everything the kitchen needs to know before it starts.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    pub heater_capacity: usize,
    pub cooler_capacity: usize,
    pub shelf_capacity: usize,
    /// Interval between two placements.
    pub rate_ms: u64,
    /// Shortest pickup delay after placement.
    pub min_pickup_ms: u64,
    /// Longest pickup delay after placement.
    pub max_pickup_ms: u64,
    pub discard_strategy: StrategyName,
    /// Freshness discount for mismatched orders, composite strategy only.
    pub mismatch_penalty: f64,
    /// Seed for pickup delays; `None` or 0 draws from entropy.
    pub seed: Option<u64>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let (heater_capacity, cooler_capacity, shelf_capacity) = Storage::DEFAULT_CAPACITIES;
        Self {
            heater_capacity,
            cooler_capacity,
            shelf_capacity,
            rate_ms: 500,
            min_pickup_ms: 4000,
            max_pickup_ms: 8000,
            discard_strategy: StrategyName::Composite,
            mismatch_penalty: DiscardPolicy::DEFAULT_PENALTY,
            seed: None,
        }
    }
}

impl KitchenConfig {
    /// Checks the configuration once, before anything is started.
    pub fn validate(&self) -> Result<(), KitchenError> {
        let invalid = |msg: &str| Err(KitchenError::InvalidConfiguration(msg.to_string()));

        if self.heater_capacity == 0 || self.cooler_capacity == 0 || self.shelf_capacity == 0 {
            return invalid("storage capacities must be greater than zero");
        }
        if self.rate_ms == 0 {
            return invalid("rate must be greater than zero");
        }
        if self.min_pickup_ms == 0 || self.max_pickup_ms == 0 {
            return invalid("pickup times must be greater than zero");
        }
        if self.min_pickup_ms >= self.max_pickup_ms {
            return invalid("minimum pickup time must be less than maximum pickup time");
        }
        if !self.mismatch_penalty.is_finite() {
            return invalid("mismatch penalty must be a finite number");
        }
        Ok(())
    }

    pub fn discard_policy(&self) -> DiscardPolicy {
        match self.discard_strategy {
            StrategyName::Freshness => DiscardPolicy::Freshness,
            StrategyName::Temperature => DiscardPolicy::TemperatureMismatch,
            StrategyName::Composite => DiscardPolicy::composite(self.mismatch_penalty),
        }
    }

    pub fn rate(&self) -> Duration {
        Duration::from_millis(self.rate_ms)
    }

    pub fn pickup_window(&self) -> (Duration, Duration) {
        (Duration::from_millis(self.min_pickup_ms), Duration::from_millis(self.max_pickup_ms))
    }

    /// Seed to use, treating 0 as "no seed".
    pub fn effective_seed(&self) -> Option<u64> {
        self.seed.filter(|seed| *seed != 0)
    }
}
