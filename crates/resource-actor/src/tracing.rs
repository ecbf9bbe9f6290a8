//! # Observability
//!
//! One-time installation of the `tracing` subscriber used by binaries.
//!
//! The level comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle and outcomes
//! RUST_LOG=debug cargo run    # request payloads as structured fields
//! RUST_LOG=warehouse_dispatch::services=debug,info cargo run
//! ```
//!
//! Module paths are hidden (`with_target(false)`); actor lines carry an `entity_type`
//! field instead, and spans such as `dispatch` or `pickup` prefix nested lines:
//!
//! ```text
//! INFO dispatch: Created entity_type="DeliveryTasksBatch" id=batch_1 size=1
//! WARN Action failed entity_type="DeliveryTask" id=delivery_4 error=...
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Calling it twice is harmless: the second installation attempt is ignored.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
