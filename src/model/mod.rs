//! Immutable reference-system data model and its WKT reader.

pub mod crs;
pub mod wkt;

pub use crs::{
    AnchorToBase, Axis, AxisDirection, CoordinateSystem, Datum, ReferenceSystem,
    ReferenceSystemKind, Unit,
};
pub use wkt::parse_reference_system;
