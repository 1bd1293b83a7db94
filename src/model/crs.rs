//! Reference systems, coordinate systems, axes, units and datums.

use crate::foundation::core::AuthorityCode;
use crate::foundation::error::{TellusError, TellusResult};
use crate::transform::Transform;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Direction in which an axis ordinate increases.
pub enum AxisDirection {
    /// Towards geographic north.
    North,
    /// Towards geographic south.
    South,
    /// Towards geographic east.
    East,
    /// Towards geographic west.
    West,
    /// Away from the earth's center or surface.
    Up,
    /// Towards the earth's center or surface.
    Down,
    /// Any direction not covered by the named ones.
    Other,
}

impl AxisDirection {
    /// Parse a WKT direction word (`NORTH`, `EAST`, ...), case-insensitive.
    pub fn parse(word: &str) -> TellusResult<Self> {
        match word.trim().to_ascii_uppercase().as_str() {
            "NORTH" => Ok(Self::North),
            "SOUTH" => Ok(Self::South),
            "EAST" => Ok(Self::East),
            "WEST" => Ok(Self::West),
            "UP" => Ok(Self::Up),
            "DOWN" => Ok(Self::Down),
            "OTHER" => Ok(Self::Other),
            other => Err(TellusError::illegal_argument(format!(
                "unknown axis direction '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Unit of measure attached to an axis.
pub struct Unit {
    /// Unit name as spelled in the definition, e.g. `degree`.
    pub name: String,
    /// Conversion factor to the base unit (metre or radian).
    pub to_base: f64,
}

impl Unit {
    /// Arc degree, in radians.
    pub fn degree() -> Self {
        Self {
            name: "degree".to_string(),
            to_base: std::f64::consts::PI / 180.0,
        }
    }

    /// SI metre.
    pub fn metre() -> Self {
        Self {
            name: "metre".to_string(),
            to_base: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One axis of a coordinate system. Immutable.
pub struct Axis {
    /// Full axis name, e.g. `Geodetic latitude`.
    pub name: String,
    /// Short form, e.g. `lat`.
    pub abbreviation: String,
    /// Direction of increasing ordinates.
    pub direction: AxisDirection,
    /// Unit of the ordinate values.
    pub unit: Unit,
}

impl Axis {
    /// Build an axis, deriving the abbreviation from well-known names.
    pub fn new(name: impl Into<String>, direction: AxisDirection, unit: Unit) -> Self {
        let name = name.into();
        let abbreviation = abbreviate(&name);
        Self {
            name,
            abbreviation,
            direction,
            unit,
        }
    }
}

fn abbreviate(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if lower.contains("latitude") {
        return "lat".to_string();
    }
    if lower.contains("longitude") {
        return "lon".to_string();
    }
    if lower.contains("easting") {
        return "e".to_string();
    }
    if lower.contains("northing") {
        return "n".to_string();
    }
    if lower.contains("height") || lower.contains("altitude") {
        return "h".to_string();
    }
    lower.chars().take(1).collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ordered sequence of axes. The order defines the coordinate tuple layout.
pub struct CoordinateSystem {
    axes: Vec<Axis>,
}

impl CoordinateSystem {
    /// Build from ordered axes; at least one is required.
    pub fn new(axes: Vec<Axis>) -> TellusResult<Self> {
        if axes.is_empty() {
            return Err(TellusError::illegal_argument(
                "a coordinate system needs at least one axis",
            ));
        }
        Ok(Self { axes })
    }

    /// The ordered axes.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Number of axes, which is the coordinate tuple length.
    pub fn dimension(&self) -> usize {
        self.axes.len()
    }

    /// Default ellipsoidal axes: longitude east, latitude north, degrees.
    pub fn default_geographic() -> Self {
        Self {
            axes: vec![
                Axis::new("Geodetic longitude", AxisDirection::East, Unit::degree()),
                Axis::new("Geodetic latitude", AxisDirection::North, Unit::degree()),
            ],
        }
    }

    /// Default cartesian projected axes: easting, northing, metres.
    pub fn default_projected() -> Self {
        Self {
            axes: vec![
                Axis::new("Easting", AxisDirection::East, Unit::metre()),
                Axis::new("Northing", AxisDirection::North, Unit::metre()),
            ],
        }
    }

    /// Default earth-centered cartesian axes, metres.
    pub fn default_geocentric() -> Self {
        Self {
            axes: vec![
                Axis::new("Geocentric X", AxisDirection::Other, Unit::metre()),
                Axis::new("Geocentric Y", AxisDirection::East, Unit::metre()),
                Axis::new("Geocentric Z", AxisDirection::North, Unit::metre()),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Reference frame anchoring a coordinate system to the earth.
pub struct Datum {
    /// Datum name, e.g. `WGS_1984`.
    pub name: String,
    /// Optional 3-parameter shift to WGS84 geocentric coordinates
    /// (the first three values of a `TOWGS84` element).
    pub to_wgs84: Option<[f64; 3]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Closed set of reference-system families handled by the engine.
pub enum ReferenceSystemKind {
    /// Ellipsoidal latitude/longitude system.
    Geographic,
    /// Map projection over a geographic base.
    Projected,
    /// Earth-centered cartesian system.
    Geocentric,
    /// Local or engineering system, including fitted systems that are
    /// defined as an offset of another reference system.
    Engineering,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Link from a fitted system to the system it is defined against.
pub struct AnchorToBase {
    /// Code of the base reference system.
    pub base: AuthorityCode,
    /// Transform from this system's coordinates to the base system's.
    pub to_base: Transform,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Immutable description of a coordinate reference system.
///
/// Built by an authority factory and shared behind `Arc`; never mutated
/// after construction. Two systems are considered equivalent when they share
/// an identifier or have structurally equal definitions, which is what
/// operation lookup uses for its identity shortcut.
pub struct ReferenceSystem {
    name: String,
    identifiers: Vec<AuthorityCode>,
    kind: ReferenceSystemKind,
    coordinate_system: CoordinateSystem,
    datum: Option<Datum>,
    anchor: Option<AnchorToBase>,
}

impl ReferenceSystem {
    /// Build and validate a reference system.
    pub fn new(
        name: impl Into<String>,
        identifiers: Vec<AuthorityCode>,
        kind: ReferenceSystemKind,
        coordinate_system: CoordinateSystem,
        datum: Option<Datum>,
        anchor: Option<AnchorToBase>,
    ) -> TellusResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TellusError::illegal_argument(
                "reference system name must be non-empty",
            ));
        }
        if let Some(anchor) = &anchor
            && anchor.to_base.source_dim() != coordinate_system.dimension()
        {
            return Err(TellusError::dimension_mismatch(format!(
                "anchor transform expects {} ordinates but the coordinate system has {} axes",
                anchor.to_base.source_dim(),
                coordinate_system.dimension()
            )));
        }
        Ok(Self {
            name,
            identifiers,
            kind,
            coordinate_system,
            datum,
            anchor,
        })
    }

    /// Primary human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All known `(authority, code)` identifiers, primary first.
    pub fn identifiers(&self) -> &[AuthorityCode] {
        &self.identifiers
    }

    /// The primary identifier, when the system has one.
    pub fn primary_identifier(&self) -> Option<&AuthorityCode> {
        self.identifiers.first()
    }

    /// Which family this system belongs to.
    pub fn kind(&self) -> ReferenceSystemKind {
        self.kind
    }

    /// The ordered-axes coordinate system.
    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.coordinate_system
    }

    /// Coordinate tuple length. Fixed at construction.
    pub fn dimension(&self) -> usize {
        self.coordinate_system.dimension()
    }

    /// The datum, when the definition carries one.
    pub fn datum(&self) -> Option<&Datum> {
        self.datum.as_ref()
    }

    /// The base-system link of a fitted system.
    pub fn anchor(&self) -> Option<&AnchorToBase> {
        self.anchor.as_ref()
    }

    /// True when the two systems share an identifier or are structurally
    /// equal (same kind, axes and datum).
    pub fn is_equivalent_to(&self, other: &ReferenceSystem) -> bool {
        let shares_identifier = self
            .identifiers
            .iter()
            .any(|id| other.identifiers.contains(id));
        shares_identifier
            || (self.kind == other.kind
                && self.coordinate_system == other.coordinate_system
                && self.datum == other.datum
                && self.anchor == other.anchor)
    }

    /// Append an identifier if it is not already present.
    ///
    /// Used by factories to make sure a decoded system round-trips to the
    /// code it was requested under.
    pub(crate) fn ensure_identifier(&mut self, id: AuthorityCode) {
        if !self.identifiers.contains(&id) {
            self.identifiers.push(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/crs.rs"]
mod tests;
