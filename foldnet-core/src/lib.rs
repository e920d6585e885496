/// Foldnet Core Library - Box nets, hinge folding and scene description
///
/// This library provides the stateless core of the fold viewer: the hinge
/// trees of the eleven cube nets, the evaluator that folds them for any
/// progress value, the dressed face primitives and overlays a renderer
/// draws, and the configuration record front-ends edit.

pub mod animation;
pub mod color;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod face;
pub mod fold;
pub mod geometry;
pub mod label;
pub mod metrics;
pub mod overlay;
pub mod pattern;
pub mod projection;
pub mod shape;
pub mod topology;
pub mod transform;

/// Every box has six faces, indexed 0 to 5.
pub const FACE_COUNT: usize = 6;

// Re-export commonly used types
pub use animation::{FoldAnimator, FoldDirection};
pub use color::Rgb;
pub use config::{SceneConfig, ShapeKind, ViewerCommand};
pub use dimensions::{BoxDimensions, DimensionAxis};
pub use error::{
    ColorError, ConfigError, GeometryError, TopologyError, UnknownLabelStyle, UnknownPattern,
};
pub use face::{Corner, FaceLabel, FacePrimitive, LabelSide};
pub use fold::{hinge_angle, FacePose, FoldProgress, NetPose};
pub use geometry::{Mesh, Triangle, Vertex};
pub use label::LabelStyle;
pub use metrics::{MathMode, Metrics, Readout};
pub use overlay::DimensionLabel;
pub use pattern::{NetFamily, NetPattern};
pub use projection::{Camera, ProjectionMode};
pub use shape::{FoldableBox, FoldableCube, FoldedScene, NetStyle, SceneFace};
pub use topology::NetTopology;
pub use transform::{RotationState, Transform};
