//! Configuration types
//!
//! Board-agnostic configuration, persisted as postcard binary data.

#[cfg(feature = "serde")]
pub mod store;
pub mod types;

#[cfg(feature = "serde")]
pub use store::*;
pub use types::*;
