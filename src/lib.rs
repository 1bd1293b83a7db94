//! Tellus is a coordinate reference system resolution and coordinate
//! operation composition engine.
//!
//! The engine answers two questions for the surrounding toolkit:
//!
//! 1. **Resolve**: `"EPSG:4326"` -> [`ReferenceSystem`], through a registry
//!    of pluggable, priority-ordered [`AuthorityFactory`] providers.
//! 2. **Convert**: `(source, target)` -> [`Operation`], a named, directional
//!    [`Transform`] discovered or synthesized by priority-ordered
//!    [`CoordinateOperationFactory`] providers, including multi-step paths
//!    composed through named intermediate systems.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: `AuthorityRegistry::decode(code) -> Arc<ReferenceSystem>`
//! 2. **Compose**: `OperationRegistry::create_operation(source, target) -> Arc<Operation>`
//! 3. **Apply**: `Operation::transform().apply(tuple)` / `apply_batch(array)`
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic fallback**: providers are always visited from highest
//!   to lowest priority, ties broken by registration order; mutation is
//!   never observed mid-iteration (copy-on-write snapshots).
//! - **Checked at construction**: transform dimension mismatches fail when a
//!   chain is built, never when it is applied.
//! - **No global registry**: embedders and tests hold private
//!   [`ReferencingEngine`] instances.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod authority;
mod engine;
mod foundation;
mod operation;
mod registry;

pub mod model;
pub mod transform;

pub use authority::{AuthorityFactory, AuthorityRegistry, PropertyAuthorityFactory};
pub use engine::ReferencingEngine;
pub use foundation::core::{AuthorityCode, CodeCategory};
pub use foundation::error::{TellusError, TellusResult};
pub use model::{
    AnchorToBase, Axis, AxisDirection, CoordinateSystem, Datum, ReferenceSystem,
    ReferenceSystemKind, Unit, parse_reference_system,
};
pub use operation::{
    CoordinateOperationFactory, Operation, OperationLookup, OperationRegistry,
    PropertyOperationFactory, parse_transform_kind_params,
};
pub use registry::ProviderSource;
pub use transform::{
    ConcatenatedTransform, GeocentricTranslation, MatrixTransform, PixelAnchor, Transform,
    pixel_anchor_adjust, pixel_anchor_adjust_axes,
};
