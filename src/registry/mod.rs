//! Provider bookkeeping shared by the authority and operation registries.

pub(crate) mod providers;
pub mod source;

pub use source::ProviderSource;
