//! Pure data structures (DTOs) for the author catalog.

pub mod author;
pub mod view;

pub use author::*;
pub use view::*;
