//! Pure data structures shared by every layer of the kitchen.
//!
//! Nothing in here has behavior beyond field access, parsing and JSON shape.

pub mod action;
pub mod order;
pub mod temperature;

pub use action::*;
pub use order::*;
pub use temperature::*;

/// Microseconds since the Unix epoch.
pub type Timestamp = i64;
