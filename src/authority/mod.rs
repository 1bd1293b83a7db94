//! Authority-code resolution: factories and their registry.

pub mod factory;
pub mod property;
pub mod registry;

pub use factory::AuthorityFactory;
pub use property::PropertyAuthorityFactory;
pub use registry::AuthorityRegistry;
