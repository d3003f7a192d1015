//! # Observability & Tracing
//!
//! Structured logging for the whole simulation, built on the `tracing` crate.
//!
//! Every actor runs inside an `actor{name=...}` span (see
//! [`framework::spawn`](crate::framework::spawn)), so each line says who emitted it:
//!
//! ```text
//! INFO actor: Customer enters the shop customer=customer_3 name="world"
//! INFO actor: Customer takes a seat customer=customer_3 seats_filled=2 name="shop"
//! INFO actor: Starting customer customer=customer_3 name="barber"
//! ```
//!
//! Verbosity comes from `RUST_LOG`, defaulting to `info`:
//!
//! ```bash
//! RUST_LOG=debug cargo run -- --customers 5   # trim durations, closing hand-offs
//! RUST_LOG=warn cargo run                     # only protocol trouble
//! ```
use tracing_subscriber::EnvFilter;

/// Installs the global compact `fmt` subscriber.
///
/// Calling it twice is harmless; the second call leaves the first subscriber in place.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // the actor span already says who is talking
        .compact()
        .try_init();
}
