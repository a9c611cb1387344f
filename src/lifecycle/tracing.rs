//! # Observability
//!
//! [`setup_tracing`] installs a compact `fmt` subscriber filtered by
//! `RUST_LOG`, falling back to `info` when the variable is unset.
//!
//! ```bash
//! # one line per action, plus start/stop and eviction decisions
//! RUST_LOG=info kitchen-hold --orders orders.json
//!
//! # full order payloads, rebalancing and pickup scheduling
//! RUST_LOG=debug kitchen-hold --orders orders.json
//! ```
//!
//! Spans nest per order, so a pickup line shows which order task issued it:
//!
//! ```text
//! INFO Action order_id="a1" action=place timestamp=1700000000000000
//! INFO order:pickup: Action order_id="a1" action=pickup timestamp=1700000005120000
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
