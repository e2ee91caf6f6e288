#![no_std] // Core types stay usable from embedded and WASM hosts

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod codes;
pub mod tag;

// Re-export core types for convenience
pub use codes::{Prime, TagCode};
pub use tag::Tag;

pub mod model;
pub use model::*;
