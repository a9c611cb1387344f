//! The placement / move / pickup / discard state machine.

pub mod error;
pub mod order_manager;

pub use error::*;
pub use order_manager::*;
