//! # System Lifecycle
//!
//! Starts the catalog's actors, hands out their clients and shuts them down.
//!
//! ## Startup
//!
//! [`CatalogSystem::new`] creates the Author actor with the mailbox capacity
//! and default page size from [`CatalogConfig`](crate::config::CatalogConfig),
//! spawns its run loop and keeps the task handle.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - closes the sender side of the mailbox
//! 2. **Actor detects closure** - `receiver.recv()` returns `None` once queued requests are served
//! 3. **Await completion** - the task handle resolves; a panic in the actor surfaces as an error
//!
//! Clones of the client held elsewhere keep the actor alive, so drop them
//! before calling `shutdown`.
//!
//! ## Observability
//!
//! Logging is set up once by the binary with
//! [`setup_tracing`](spec_framework::tracing::setup_tracing):
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and state changes
//! RUST_LOG=debug cargo run     # every request, with the rendered predicate
//! ```

pub mod catalog_system;

pub use catalog_system::*;
