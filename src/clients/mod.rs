//! Type-safe handle to the kitchen actor.

pub mod kitchen_client;

pub use kitchen_client::*;
