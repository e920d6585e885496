/// Fold progress and the hinge-tree evaluator.
///
/// A net is evaluated by walking its [`NetTopology`] from the root, composing
/// each hinge frame onto its parent's frame:
///
/// ```text
/// frame(child) = frame(parent) · T(hinge offset) · R(axis, sign · angle)
/// face(child)  = frame(child) · T(centre) · lay_flat
/// ```
///
/// Every hinge shares the same angle, so turning one hinge carries every face
/// beyond it along.

use std::f32::consts::FRAC_PI_2;

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dimensions::BoxDimensions;
use crate::face::Corner;
use crate::pattern::NetPattern;
use crate::topology::{HingeNode, NetTopology};
use crate::transform::{HingeAxis, Transform};

/// Hinge angle of a closed box.
pub const CLOSED_ANGLE: f32 = FRAC_PI_2;

/// Tolerance for deciding that a corner sits on its hinge line.
const HINGE_EPSILON: f32 = 1e-4;

/// How far the box is unfolded: 0 is the closed solid, 1 the flat net.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct FoldProgress(f32);

impl FoldProgress {
    pub const CLOSED: Self = Self(0.0);
    pub const FLAT: Self = Self(1.0);
    pub const HALF: Self = Self(0.5);

    /// Clamp into `[0, 1]`; NaN counts as closed.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::CLOSED
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// `(1 - progress) · π/2`
    pub fn hinge_angle(self) -> f32 {
        hinge_angle(self.0)
    }
}

impl From<f32> for FoldProgress {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<FoldProgress> for f32 {
    fn from(progress: FoldProgress) -> Self {
        progress.0
    }
}

/// Angle shared by every hinge at the given progress, clamped to `[0, π/2]`.
pub fn hinge_angle(progress: f32) -> f32 {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    (1.0 - progress) * CLOSED_ANGLE
}

/// World placement of one face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacePose {
    pub face: usize,
    pub parent: Option<usize>,
    /// Frame of the face's hinge; the root's is the identity.
    pub hinge_frame: Matrix4<f32>,
    /// Maps the face's local XY rectangle into the world.
    pub transform: Matrix4<f32>,
    pub width: f32,
    pub height: f32,
    /// Corners lying on the hinge line, shared with the parent face.
    pub hinge_corners: Vec<Corner>,
}

impl FacePose {
    pub fn center(&self) -> Point3<f32> {
        self.transform.transform_point(&Point3::origin())
    }

    /// Outward (front) normal in world space.
    pub fn normal(&self) -> Vector3<f32> {
        self.transform.transform_vector(&Vector3::z()).normalize()
    }

    pub fn corner(&self, corner: Corner) -> Point3<f32> {
        self.transform
            .transform_point(&corner.position(self.width, self.height))
    }
}

/// Every face of a net placed for one progress value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetPose {
    pub pattern: NetPattern,
    pub progress: FoldProgress,
    pub angle: f32,
    /// In walk order: root first, every parent before its children.
    pub faces: Vec<FacePose>,
}

impl NetPose {
    /// Walk the pattern's hinge tree for these extents and progress.
    pub fn evaluate(pattern: NetPattern, dims: &BoxDimensions, progress: FoldProgress) -> Self {
        let topology = pattern.topology();
        let angle = progress.hinge_angle();
        trace!(%pattern, progress = progress.value(), angle, "evaluating net");

        let mut faces = Vec::with_capacity(topology.nodes.len());
        if let Some(root) = topology.root() {
            walk(topology, root, &Matrix4::identity(), dims, angle, &mut faces);
        }

        Self {
            pattern,
            progress,
            angle,
            faces,
        }
    }

    pub fn face(&self, index: usize) -> Option<&FacePose> {
        self.faces.iter().find(|f| f.face == index)
    }
}

fn walk(
    topology: &NetTopology,
    node: &HingeNode,
    parent_frame: &Matrix4<f32>,
    dims: &BoxDimensions,
    angle: f32,
    out: &mut Vec<FacePose>,
) {
    let hinge_frame = match &node.attachment {
        Some(attachment) => {
            parent_frame
                * Transform::hinge_matrix(
                    &attachment.at.resolve(dims),
                    attachment.axis,
                    attachment.sign,
                    angle,
                )
        }
        None => *parent_frame,
    };

    let center = node.center.resolve(dims);
    let local = Matrix4::new_translation(&center) * Transform::lay_flat();
    let (width, height) = node.resolved_size(dims);

    let hinge_corners = match &node.attachment {
        Some(attachment) => Corner::ALL
            .into_iter()
            .filter(|corner| {
                let p = local.transform_point(&corner.position(width, height));
                let across = match attachment.axis {
                    HingeAxis::X => p.z,
                    HingeAxis::Z => p.x,
                };
                across.abs() < HINGE_EPSILON
            })
            .collect(),
        None => Vec::new(),
    };

    out.push(FacePose {
        face: node.face,
        parent: node.parent(),
        hinge_frame,
        transform: hinge_frame * local,
        width,
        height,
        hinge_corners,
    });

    for child in topology.children(node.face) {
        walk(topology, child, &hinge_frame, dims, angle, out);
    }
}
