//! # Kitchen Hold
//!
//! A holding area for a delivery kitchen: cooked orders wait in a heater, a
//! cooler or an ambient shelf until a courier picks them up.
//!
//! ## Core Concepts
//!
//! - **Compartments** are capacity-bounded. An order belongs to at most one at a time.
//! - **Freshness** decays with time spent in the kitchen, twice as fast away from the ideal temperature.
//!   It is never stored, only derived from an injected [`Clock`](freshness::Clock).
//! - **Placement** falls back from the ideal compartment, to the shelf, to one rebalancing move
//!   off the shelf, to discarding the shelf's worst order as chosen by a [`DiscardPolicy`](eviction::DiscardPolicy).
//! - **Actions** (`place`, `move`, `pickup`, `discard`) are appended to an event log in emission order.
//!
//! ## Concurrency Model
//!
//! The [`OrderManager`](manager::OrderManager) is owned by a single
//! [`KitchenActor`](actor::KitchenActor). Every transition and every query goes
//! through its queue, so no two transitions interleave. [`Storage`](storage::Storage)
//! still guards its own compartments and index, so it stays safe on its own.
//!
//! ## Module Tour
//!
//! - [`model`]: orders, temperatures, compartment kinds and actions.
//! - [`storage`]: compartments and the holding area with its location index.
//! - [`freshness`]: clocks and the freshness tracker.
//! - [`eviction`]: discard strategies.
//! - [`events`]: the action log.
//! - [`manager`]: the placement state machine and the crate's error type.
//! - [`actor`] / [`clients`]: the serialization point and its async handle.
//! - [`scheduler`]: timed placements and randomized pickups.
//! - [`config`] / [`lifecycle`]: configuration, startup and tracing.

pub mod actor;
pub mod clients;
pub mod config;
pub mod eviction;
pub mod events;
pub mod freshness;
pub mod lifecycle;
pub mod manager;
pub mod model;
pub mod scheduler;
pub mod storage;
