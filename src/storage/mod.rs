//! Capacity-bounded compartments and the three-compartment holding area.
//!
//! - [`Compartment`] is a bounded keyed set of orders for one temperature.
//! - [`Storage`] owns the heater, cooler and shelf plus an id → compartment
//!   index that is only ever trusted after membership is confirmed.

pub mod compartment;
pub mod error;
pub mod kitchen;

pub use compartment::*;
pub use error::*;
pub use kitchen::*;
