//! Domain clients wrapping the generic [`ResourceClient`](spec_framework::ResourceClient).

pub mod author_client;

pub use author_client::*;
