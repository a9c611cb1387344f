//! The kitchen's single serialization point.
//!
//! # Main Components
//!
//! - [`KitchenActor`] - Owns the [`OrderManager`](crate::manager::OrderManager) and processes requests sequentially
//! - [`KitchenRequest`] - The messages a [`KitchenClient`](crate::clients::KitchenClient) sends it
//!
//! # Testing
//!
//! See [`mock`] for a client wired to a channel the test controls.

pub mod kitchen_actor;
pub mod message;
pub mod mock;

pub use kitchen_actor::*;
pub use message::*;
