/// Foldable shapes: the general rectangular box and the cube adapter.
///
/// [`FoldableBox::build`] is the single entry point from configuration to a
/// renderable scene. It evaluates the hinge tree, then dresses every placed
/// face with its colour, label and markers.

use nalgebra::Matrix4;
use serde::Serialize;
use tracing::trace;

use crate::color::{Rgb, DEFAULT_PALETTE};
use crate::dimensions::BoxDimensions;
use crate::error::GeometryError;
use crate::face::{FaceParams, FacePrimitive, DEFAULT_OPACITY};
use crate::fold::{FoldProgress, NetPose};
use crate::label::{label_rotation, label_text, LabelStyle};
use crate::metrics::Metrics;
use crate::overlay::{dimension_labels, DimensionLabel};
use crate::pattern::NetPattern;
use crate::FACE_COUNT;

/// Everything about how a net looks, independent of its geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct NetStyle {
    pub palette: [Rgb; FACE_COUNT],
    pub opacity: f32,
    pub show_wireframe: bool,
    pub show_vertices: bool,
    pub show_labels: bool,
    pub label_style: LabelStyle,
    pub label_color: Rgb,
    pub show_dimensions: bool,
    /// Skip the corner markers a child face shares with its parent.
    pub merge_shared_corners: bool,
}

impl Default for NetStyle {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE,
            opacity: DEFAULT_OPACITY,
            show_wireframe: true,
            show_vertices: true,
            show_labels: true,
            label_style: LabelStyle::Numbers,
            label_color: Rgb::WHITE,
            show_dimensions: false,
            merge_shared_corners: true,
        }
    }
}

/// One dressed face placed in the world.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFace {
    pub index: usize,
    pub parent: Option<usize>,
    pub hinge_frame: Matrix4<f32>,
    /// Local face frame to world.
    pub transform: Matrix4<f32>,
    pub primitive: FacePrimitive,
}

/// Renderable description of one folded net.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldedScene {
    pub pattern: NetPattern,
    pub progress: FoldProgress,
    pub hinge_angle: f32,
    pub dimensions: BoxDimensions,
    /// Root first, every parent before its children.
    pub faces: Vec<SceneFace>,
    /// Only the overlays that are switched on.
    pub overlays: Vec<DimensionLabel>,
    pub metrics: Metrics,
}

impl FoldedScene {
    pub fn face(&self, index: usize) -> Option<&SceneFace> {
        self.faces.iter().find(|f| f.index == index)
    }
}

/// A rectangular box folded along one of the eleven nets.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldableBox {
    pub dimensions: BoxDimensions,
    pub pattern: NetPattern,
    pub progress: FoldProgress,
    pub style: NetStyle,
}

impl FoldableBox {
    pub fn new(dimensions: BoxDimensions, pattern: NetPattern, progress: FoldProgress) -> Self {
        Self {
            dimensions,
            pattern,
            progress,
            style: NetStyle::default(),
        }
    }

    pub fn with_style(mut self, style: NetStyle) -> Self {
        self.style = style;
        self
    }

    /// Face placements only, without any dressing.
    pub fn pose(&self) -> NetPose {
        NetPose::evaluate(self.pattern, &self.dimensions, self.progress)
    }

    pub fn build(&self) -> FoldedScene {
        let pose = self.pose();
        let style = &self.style;

        let faces = pose
            .faces
            .iter()
            .map(|placed| {
                let index = placed.face;
                let params = FaceParams {
                    width: placed.width,
                    height: placed.height,
                    color: style.palette[index],
                    opacity: style.opacity,
                    show_wireframe: style.show_wireframe,
                    show_vertices: style.show_vertices,
                    hidden_corners: if style.merge_shared_corners {
                        placed.hinge_corners.clone()
                    } else {
                        Vec::new()
                    },
                    label: label_text(style.show_labels, style.label_style, index),
                    label_rotation: label_rotation(index),
                    text_color: style.label_color,
                };
                SceneFace {
                    index,
                    parent: placed.parent,
                    hinge_frame: placed.hinge_frame,
                    transform: placed.transform,
                    primitive: FacePrimitive::build(&params),
                }
            })
            .collect();

        let overlays = if style.show_dimensions {
            dimension_labels(&self.dimensions, true).into()
        } else {
            Vec::new()
        };

        trace!(pattern = %self.pattern, faces = pose.faces.len(), "built scene");

        FoldedScene {
            pattern: self.pattern,
            progress: self.progress,
            hinge_angle: pose.angle,
            dimensions: self.dimensions,
            faces,
            overlays,
            metrics: self.dimensions.metrics(),
        }
    }
}

/// A cube: the general box with one size on every axis.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldableCube {
    dimensions: BoxDimensions,
    pub pattern: NetPattern,
    pub progress: FoldProgress,
    pub style: NetStyle,
}

impl FoldableCube {
    pub fn new(size: f32, pattern: NetPattern, progress: FoldProgress) -> Result<Self, GeometryError> {
        Ok(Self {
            dimensions: BoxDimensions::cube(size)?,
            pattern,
            progress,
            style: NetStyle::default(),
        })
    }

    /// Cube whose size is the length of an existing box.
    pub fn from_length(dims: &BoxDimensions, pattern: NetPattern, progress: FoldProgress) -> Self {
        let size = dims.length();
        Self {
            dimensions: BoxDimensions::from_unchecked(size, size, size),
            pattern,
            progress,
            style: NetStyle::default(),
        }
    }

    pub fn with_style(mut self, style: NetStyle) -> Self {
        self.style = style;
        self
    }

    pub fn size(&self) -> f32 {
        self.dimensions.length()
    }

    pub fn build(&self) -> FoldedScene {
        FoldableBox::from(self).build()
    }
}

impl From<&FoldableCube> for FoldableBox {
    fn from(cube: &FoldableCube) -> Self {
        Self {
            dimensions: cube.dimensions,
            pattern: cube.pattern,
            progress: cube.progress,
            style: cube.style.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{Corner, LabelSide};

    fn prism(pattern: NetPattern) -> FoldableBox {
        FoldableBox::new(BoxDimensions::PRISM, pattern, FoldProgress::HALF)
    }

    #[test]
    fn test_scene_has_six_dressed_faces() {
        let scene = prism(NetPattern::Net1).build();
        assert_eq!(scene.faces.len(), FACE_COUNT);
        for face in &scene.faces {
            assert_eq!(face.primitive.material.color, DEFAULT_PALETTE[face.index]);
            let front = face.primitive.label(LabelSide::Front).unwrap();
            assert_eq!(front.text, (face.index + 1).to_string());
        }
        assert!(scene.overlays.is_empty());
        assert_eq!(scene.metrics.volume, 9.0);
    }

    #[test]
    fn test_shared_corners_are_merged() {
        let scene = prism(NetPattern::Net1).build();
        assert_eq!(scene.face(0).unwrap().primitive.corners.len(), 4);
        let front = &scene.face(1).unwrap().primitive;
        let shown: Vec<Corner> = front.corners.iter().map(|m| m.corner).collect();
        assert_eq!(shown, vec![Corner::BottomLeft, Corner::BottomRight]);

        let mut unmerged = prism(NetPattern::Net1);
        unmerged.style.merge_shared_corners = false;
        let scene = unmerged.build();
        for face in &scene.faces {
            assert_eq!(face.primitive.corners.len(), 4);
        }
    }

    #[test]
    fn test_dimension_overlays_follow_flag() {
        let mut shape = prism(NetPattern::Net4);
        shape.style.show_dimensions = true;
        let scene = shape.build();
        let texts: Vec<&str> = scene.overlays.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["3.0 cm", "2.0 cm", "1.5 cm"]);
    }

    #[test]
    fn test_hidden_labels_produce_no_text() {
        let mut shape = prism(NetPattern::Net2);
        shape.style.show_labels = false;
        for face in shape.build().faces {
            assert!(face.primitive.labels.is_empty());
        }
    }

    #[test]
    fn test_cube_matches_general_engine() {
        let cube = FoldableCube::new(2.0, NetPattern::Net10, FoldProgress::new(0.3)).unwrap();
        let general = FoldableBox::new(
            BoxDimensions::new(2.0, 2.0, 2.0).unwrap(),
            NetPattern::Net10,
            FoldProgress::new(0.3),
        );
        assert_eq!(cube.build(), general.build());
        assert_eq!(cube.size(), 2.0);
    }

    #[test]
    fn test_cube_rejects_bad_size() {
        assert!(FoldableCube::new(0.0, NetPattern::Net1, FoldProgress::FLAT).is_err());
        assert!(FoldableCube::new(f32::NAN, NetPattern::Net1, FoldProgress::FLAT).is_err());
    }
}
