//! Discard policies: which shelf order to sacrifice when the kitchen is full.
//!
//! A policy is a pure function over a snapshot of candidates. Candidates arrive
//! in ascending id order, and every policy keeps the first candidate it sees
//! on a tie, so equal scores resolve to the smallest id.

use crate::freshness::FreshnessTracker;
use crate::model::Order;
use crate::storage::Compartment;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use thiserror::Error;

/// Errors raised while choosing a victim.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvictionError {
    /// There was nothing to choose from.
    #[error("Cannot select an order to discard: {0} is empty")]
    NoCandidates(String),
}

/// How to pick the order to discard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscardPolicy {
    /// Least fresh order goes first.
    Freshness,
    /// First order held away from its ideal temperature, else least fresh.
    TemperatureMismatch,
    /// Least fresh after discounting mismatched orders by `penalty`.
    Composite { penalty: f64 },
}

impl DiscardPolicy {
    pub const DEFAULT_PENALTY: f64 = 0.2;

    /// Composite policy with `penalty` clamped to `[0, 1]`.
    pub fn composite(penalty: f64) -> Self {
        let penalty = if penalty.is_nan() { 0.0 } else { penalty.clamp(0.0, 1.0) };
        DiscardPolicy::Composite { penalty }
    }

    /// Picks the id of the order to discard from `candidates`, all held in `compartment`.
    pub fn select_victim(
        &self,
        candidates: &BTreeMap<String, Order>,
        compartment: &Compartment,
        tracker: &FreshnessTracker,
    ) -> Result<String, EvictionError> {
        if candidates.is_empty() {
            return Err(EvictionError::NoCandidates(compartment.kind().to_string()));
        }
        let freshness = tracker.normalized_freshness_values();
        let mismatched = |order: &Order| order.temp != compartment.temperature();

        let victim = match self {
            DiscardPolicy::Freshness => least_by(candidates, |id, _| score(&freshness, id)),
            DiscardPolicy::TemperatureMismatch => candidates
                .iter()
                .find(|(_, order)| mismatched(order))
                .map(|(id, _)| id.clone())
                .or_else(|| least_by(candidates, |id, _| score(&freshness, id))),
            DiscardPolicy::Composite { penalty } => least_by(candidates, |id, order| {
                let value = score(&freshness, id);
                if mismatched(order) {
                    value * (1.0 - penalty)
                } else {
                    value
                }
            }),
        };

        victim.ok_or_else(|| EvictionError::NoCandidates(compartment.kind().to_string()))
    }
}

impl Default for DiscardPolicy {
    fn default() -> Self {
        DiscardPolicy::composite(Self::DEFAULT_PENALTY)
    }
}

impl Display for DiscardPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscardPolicy::Freshness => f.write_str("freshness"),
            DiscardPolicy::TemperatureMismatch => f.write_str("temperature"),
            DiscardPolicy::Composite { penalty } => write!(f, "composite(penalty={penalty})"),
        }
    }
}

/// Untracked orders score as already expired.
fn score(freshness: &HashMap<String, f64>, id: &str) -> f64 {
    freshness.get(id).copied().unwrap_or(0.0)
}

/// First candidate with the strictly lowest score.
fn least_by(candidates: &BTreeMap<String, Order>, mut score: impl FnMut(&str, &Order) -> f64) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;
    for (id, order) in candidates {
        let value = score(id, order);
        match best {
            Some((_, lowest)) if value >= lowest => {}
            _ => best = Some((id, value)),
        }
    }
    best.map(|(id, _)| id.clone())
}
