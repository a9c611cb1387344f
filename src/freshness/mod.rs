//! Freshness decay.
//!
//! Freshness is never stored. It is derived on every read from the time an
//! order has spent in the kitchen, its nominal shelf life, and whether it is
//! held at its ideal temperature (shelf life halves when it is not). There is
//! no background sweep; expiry is evaluated when someone asks.

pub mod clock;
pub mod tracker;

pub use clock::*;
pub use tracker::*;
