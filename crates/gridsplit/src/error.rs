/// Grid construction failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("displacement.x must be strictly positive, got {0}")]
    NonPositiveDisplacementX(i64),

    #[error("displacement.y must be strictly positive, got {0}")]
    NonPositiveDisplacementY(i64),

    #[error("grid has zero columns (numx == 0)")]
    ZeroColumns,

    #[error("grid has zero rows (numy == 0)")]
    ZeroRows,
}

/// A layer's Z or tilt shift is geometrically inconsistent with the grid.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayerGeometryError {
    #[error("z ({z}) is below zmin ({zmin}) for a non-vertical wall angle")]
    ZBelowZMin { z: f64, zmin: f64 },

    #[error("tilt shift ({shift}) meets or exceeds displacement.x ({displacement_x})")]
    ShiftExceedsDisplacementX { shift: i64, displacement_x: i64 },

    #[error("tilt shift ({shift}) meets or exceeds displacement.y ({displacement_y})")]
    ShiftExceedsDisplacementY { shift: i64, displacement_y: i64 },
}

/// Wraps a failure surfaced while driving the external clipper (`geo`'s boolean ops)
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClipperError {
    #[error("subject path could not be converted to a polygon for clipping: {0}")]
    InvalidSubjectPolygon(String),
}

/// Top-level error returned by [`crate::PathSplitter::setup`] and
/// [`crate::PathSplitter::process_paths`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    LayerGeometry(#[from] LayerGeometryError),

    #[error(transparent)]
    Clipper(#[from] ClipperError),
}

pub type Result<T> = std::result::Result<T, SplitError>;
