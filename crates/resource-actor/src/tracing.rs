//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for every actor and client in the process.
//!
//! The actor loop logs each request with an `entity_type` field (`Order`, `Staff`, …) and the
//! record ID, so module paths are hidden (`with_target(false)`) to keep lines short:
//!
//! ```text
//! INFO Created entity_type="Order" id=order_1 size=1
//! WARN Conflict entity_type="Order" id=order_1 expected=2 actual=3
//! INFO Updated entity_type="Order" id=order_1 version=3
//! ```
//!
//! Levels are controlled by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run          # lifecycle + committed mutations
//! RUST_LOG=debug cargo run         # full request payloads
//! RUST_LOG=brigade=debug cargo run # one crate only
//! ```
//!
//! Without `RUST_LOG`, `info` is used.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber (compact format, `RUST_LOG` filtering).
///
/// Calling it twice is harmless: the second installation attempt is ignored.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
