//! Grid anchor conventions for raster grid-to-world transforms.

use crate::foundation::error::{TellusError, TellusResult};
use crate::transform::{ConcatenatedTransform, MatrixTransform, Transform};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Named anchor point of a grid cell, relative to which a grid-to-world
/// transform is expressed.
///
/// Raster conventions disagree on whether integer grid indices address the
/// center of a pixel or one of its corners; converting between the two is a
/// half-cell shift prepended to the grid-to-world transform.
pub enum PixelAnchor {
    /// Integer indices address the cell center.
    Center,
    /// Integer indices address the upper-left corner (alias `corner`).
    Corner,
    /// Upper-left corner, explicitly.
    UpperLeft,
    /// Upper-right corner.
    UpperRight,
    /// Lower-left corner.
    LowerLeft,
    /// Lower-right corner.
    LowerRight,
}

impl PixelAnchor {
    /// Parse a case-insensitive anchor name.
    ///
    /// Accepts `center`, `corner`, `upper_left`, `upper-right`, `lowerleft`
    /// and the like; anything else is an [`TellusError::IllegalArgument`].
    pub fn parse(name: &str) -> TellusResult<Self> {
        let canon: String = name
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect();
        match canon.as_str() {
            "center" | "centre" => Ok(Self::Center),
            "corner" => Ok(Self::Corner),
            "upperleft" => Ok(Self::UpperLeft),
            "upperright" => Ok(Self::UpperRight),
            "lowerleft" => Ok(Self::LowerLeft),
            "lowerright" => Ok(Self::LowerRight),
            _ => Err(TellusError::illegal_argument(format!(
                "unknown pixel anchor '{name}'"
            ))),
        }
    }

    /// Offset of this anchor relative to the cell center, in grid units.
    pub fn offset(self) -> (f64, f64) {
        match self {
            Self::Center => (0.0, 0.0),
            Self::Corner | Self::UpperLeft => (-0.5, -0.5),
            Self::UpperRight => (0.5, -0.5),
            Self::LowerLeft => (-0.5, 0.5),
            Self::LowerRight => (0.5, 0.5),
        }
    }
}

/// Re-anchor a grid-to-world transform from `current` to `desired`, shifting
/// along grid axes 0 and 1.
pub fn pixel_anchor_adjust(
    grid_to_world: &Transform,
    current: PixelAnchor,
    desired: PixelAnchor,
) -> TellusResult<Transform> {
    pixel_anchor_adjust_axes(grid_to_world, current, desired, 0, 1)
}

/// Re-anchor a grid-to-world transform, naming the two grid axes to shift.
///
/// The returned transform is `grid_to_world` with a translation of the
/// algebraic difference between the two anchor offsets prepended. Axis
/// indices outside the transform's input dimension are rejected.
pub fn pixel_anchor_adjust_axes(
    grid_to_world: &Transform,
    current: PixelAnchor,
    desired: PixelAnchor,
    x_axis: usize,
    y_axis: usize,
) -> TellusResult<Transform> {
    let dim = grid_to_world.source_dim();
    for axis in [x_axis, y_axis] {
        if axis >= dim {
            return Err(TellusError::illegal_argument(format!(
                "axis index {axis} is outside the transform's {dim} input dimensions"
            )));
        }
    }
    if x_axis == y_axis {
        return Err(TellusError::illegal_argument(
            "pixel anchor axes must be distinct",
        ));
    }
    if current == desired || current.offset() == desired.offset() {
        return Ok(grid_to_world.clone());
    }

    // A tuple expressed relative to `desired` must first be moved into the
    // `current` convention the transform expects.
    let (cx, cy) = current.offset();
    let (dx, dy) = desired.offset();
    let mut offsets = vec![0.0; dim];
    offsets[x_axis] = dx - cx;
    offsets[y_axis] = dy - cy;

    let shift = Transform::Matrix(MatrixTransform::translation(&offsets)?);
    ConcatenatedTransform::create(shift, grid_to_world.clone())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/pixel.rs"]
mod tests;
