//! # Tracing Setup
//!
//! Structured logging for binaries built on this crate. Every actor logs with
//! an `entity_type` field, and every [`ActorClient`](crate::ActorClient) default
//! method opens a span named after the operation.
//!
//! Verbosity comes from `RUST_LOG`:
//! - `RUST_LOG=info` - lifecycle events (actor started, created, deleted, shutdown)
//! - `RUST_LOG=debug` - adds every request, including the rendered predicate of each query
//! - `RUST_LOG=spec_framework=debug,author_catalog=info` - per-crate filtering
//!
//! With `debug`, a query against the book join shows up as
//! `DEBUG find_all: Executing predicate=(lower(books.title) like '%spring%') distinct=true ...`.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the actor
        .compact()
        .init();
}
