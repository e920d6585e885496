/// Error types for the fold engine.
///
/// The evaluator itself is total: once a [`BoxDimensions`](crate::BoxDimensions)
/// exists, folding it cannot fail. Errors only arise at the edges where raw
/// values enter the core (extents, colour strings, configuration files) and
/// when checking the static topology table.

use std::path::PathBuf;

use thiserror::Error;

use crate::dimensions::DimensionAxis;

/// Raised when a box extent would make a degenerate shape.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("{axis} must be a positive finite length, got {value}")]
    NonPositiveExtent { axis: DimensionAxis, value: f32 },
}

/// Raised when a colour string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid colour {0:?}: expected #rgb, #rrggbb, white or black")]
    Invalid(String),
}

/// A net name that is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown net pattern {0:?} (expected NET_1 to NET_11)")]
pub struct UnknownPattern(pub String);

/// A label style name other than numbers, letters, roman or blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label style {0:?} (expected numbers, letters, roman or blank)")]
pub struct UnknownLabelStyle(pub String);

/// Structural problems in a hinge tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("face {0} does not appear in the hinge tree")]
    MissingFace(usize),

    #[error("face {0} appears more than once in the hinge tree")]
    DuplicateFace(usize),

    #[error("hinge tree must have exactly one root, found {0}")]
    RootCount(usize),

    #[error("face {face} is hinged to face {parent}, which is not in the tree")]
    UnknownParent { face: usize, parent: usize },

    #[error("face {0} never reaches the root face")]
    Cycle(usize),
}

/// Failures while loading or encoding a [`SceneConfig`](crate::SceneConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
