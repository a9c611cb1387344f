//! The append-only record of kitchen transitions.

pub mod action_log;

pub use action_log::*;
