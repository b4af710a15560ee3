//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter for
//! binaries built on this crate.
//!
//! ```bash
//! RUST_LOG=info cargo run -p catalog-browser -- list
//! RUST_LOG=catalog_browser=debug,catalog_api=debug cargo run -p catalog-browser -- list --kind episode
//! ```
//!
//! What gets logged:
//!
//! - **Fetches**: one span per request with `kind` and `page`, the URL at
//!   `debug`, unexpected statuses at `warn`.
//! - **Coordinator**: startup and shutdown, each dispatched load with its
//!   `load_id`, applied results, discarded (superseded) completions, failures.

/// Initializes the global subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
