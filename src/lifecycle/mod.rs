//! Startup, run and shutdown of the whole kitchen.

pub mod kitchen_system;
pub mod tracing;

pub use kitchen_system::*;
pub use self::tracing::*;
