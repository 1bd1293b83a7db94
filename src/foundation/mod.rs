//! Shared low-level building blocks: errors, codes, caching, numerics.

pub(crate) mod cache;
pub mod core;
pub mod error;
pub(crate) mod math;
