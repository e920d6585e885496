/// Face primitive: one thin rectangular slab with optional outline, corner
/// markers and a label printed on both sides.
///
/// Everything is expressed in the face's own frame, with the rectangle in the
/// XY plane centred on the origin and the front surface facing +Z.

use std::f32::consts::PI;

use nalgebra::{Matrix4, Point3, Vector3};
use serde::Serialize;

use crate::color::Rgb;
use crate::geometry::{cuboid_edges, Mesh};
use crate::transform::Transform;

/// Slab thickness. Visual only: the fold geometry treats faces as planes.
pub const FACE_THICKNESS: f32 = 0.05;
/// Distance of each label from the centre plane, just outside the slab.
pub const LABEL_OFFSET: f32 = FACE_THICKNESS / 2.0 + 0.015;
/// Label glyph height relative to the face's shorter side.
pub const LABEL_SCALE: f32 = 0.4;
pub const CORNER_MARKER_RADIUS: f32 = 0.11;
pub const DEFAULT_OPACITY: f32 = 0.9;

/// Corners of a face rectangle, indexed as in the hide-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Position on the centre plane of a `width × height` face.
    pub fn position(self, width: f32, height: f32) -> Point3<f32> {
        let (x, y) = match self {
            Self::TopLeft => (-width / 2.0, height / 2.0),
            Self::TopRight => (width / 2.0, height / 2.0),
            Self::BottomLeft => (-width / 2.0, -height / 2.0),
            Self::BottomRight => (width / 2.0, -height / 2.0),
        };
        Point3::new(x, y, 0.0)
    }
}

/// Surface appearance of the slab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub color: Rgb,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub double_sided: bool,
}

impl Material {
    pub fn face(color: Rgb, opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
            roughness: 0.4,
            metalness: 0.1,
            double_sided: true,
        }
    }
}

/// Inputs for building one face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceParams {
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub show_wireframe: bool,
    pub show_vertices: bool,
    /// Corners whose markers are skipped.
    pub hidden_corners: Vec<Corner>,
    /// Empty means no label.
    pub label: String,
    /// Rotation of the label about the face normal, in radians.
    pub label_rotation: f32,
    pub text_color: Rgb,
}

impl FaceParams {
    pub fn new(width: f32, height: f32, color: Rgb) -> Self {
        Self {
            width,
            height,
            color,
            opacity: DEFAULT_OPACITY,
            show_wireframe: false,
            show_vertices: false,
            hidden_corners: Vec::new(),
            label: String::new(),
            label_rotation: 0.0,
            text_color: Rgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelSide {
    Front,
    Back,
}

/// A text label placed on one side of the face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceLabel {
    pub side: LabelSide,
    pub text: String,
    /// Places the text (drawn in its own XY plane) relative to the face.
    pub transform: Matrix4<f32>,
    pub font_size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CornerMarker {
    pub corner: Corner,
    pub position: Point3<f32>,
    pub radius: f32,
    pub color: Rgb,
}

/// A renderable face in its local frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacePrimitive {
    pub width: f32,
    pub height: f32,
    pub slab: Mesh,
    pub material: Material,
    /// Slab edges, present when the wireframe is on.
    pub outline: Vec<[Point3<f32>; 2]>,
    pub outline_color: Rgb,
    pub corners: Vec<CornerMarker>,
    /// Front then back copy, or empty.
    pub labels: Vec<FaceLabel>,
}

impl FacePrimitive {
    pub fn build(params: &FaceParams) -> Self {
        let (w, h) = (params.width, params.height);

        let outline = if params.show_wireframe {
            cuboid_edges(w, h, FACE_THICKNESS)
        } else {
            Vec::new()
        };

        let corners = if params.show_vertices {
            Corner::ALL
                .into_iter()
                .filter(|c| !params.hidden_corners.contains(c))
                .map(|corner| CornerMarker {
                    corner,
                    position: corner.position(w, h),
                    radius: CORNER_MARKER_RADIUS,
                    color: Rgb::MARKER,
                })
                .collect()
        } else {
            Vec::new()
        };

        let labels = if params.label.is_empty() {
            Vec::new()
        } else {
            let font_size = w.min(h) * LABEL_SCALE;
            let spin = Transform::axis_rotation(&Vector3::z(), params.label_rotation);
            let label = |side, transform| FaceLabel {
                side,
                text: params.label.clone(),
                transform,
                font_size,
                color: params.text_color,
            };
            vec![
                label(
                    LabelSide::Front,
                    Transform::translation_matrix(0.0, 0.0, LABEL_OFFSET) * spin,
                ),
                // Turned over about local Y so it reads correctly from behind.
                label(
                    LabelSide::Back,
                    Transform::translation_matrix(0.0, 0.0, -LABEL_OFFSET)
                        * Transform::axis_rotation(&Vector3::y(), PI)
                        * spin,
                ),
            ]
        };

        Self {
            width: w,
            height: h,
            slab: Mesh::cuboid(w, h, FACE_THICKNESS),
            material: Material::face(params.color, params.opacity),
            outline,
            outline_color: Rgb::WHITE,
            corners,
            labels,
        }
    }

    pub fn label(&self, side: LabelSide) -> Option<&FaceLabel> {
        self.labels.iter().find(|l| l.side == side)
    }
}
