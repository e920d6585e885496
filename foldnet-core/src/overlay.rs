/// Screen-facing dimension labels for length, width and height
use nalgebra::{Matrix4, Point3};
use serde::Serialize;

use crate::dimensions::{BoxDimensions, DimensionAxis};
use crate::projection::Camera;

/// A measurement chip anchored in the shape frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionLabel {
    pub axis: DimensionAxis,
    pub anchor: Point3<f32>,
    pub text: String,
    pub visible: bool,
}

impl DimensionLabel {
    /// Transform that keeps the chip facing the camera.
    pub fn billboard(&self, camera: &Camera) -> Matrix4<f32> {
        camera.billboard_matrix(&self.anchor)
    }
}

/// `3.0 cm`
pub fn format_extent(value: f32) -> String {
    format!("{value:.1} cm")
}

/// Labels for all three extents.
///
/// Anchors come from the box's own extents, not from where the active net
/// has put its faces, so they sit beside the closed box whatever the fold
/// progress or pattern.
pub fn dimension_labels(dims: &BoxDimensions, visible: bool) -> [DimensionLabel; 3] {
    let (l, w, h) = (dims.length(), dims.width(), dims.height());
    DimensionAxis::ALL.map(|axis| {
        let anchor = match axis {
            DimensionAxis::Length => Point3::new(0.0, 0.0, w / 2.0 + 0.3),
            DimensionAxis::Width => Point3::new(l / 2.0 + 0.3, 0.0, 0.0),
            DimensionAxis::Height => Point3::new(-l / 2.0 - 0.2, h / 2.0, w / 2.0 + 0.2),
        };
        DimensionLabel {
            axis,
            anchor,
            text: format_extent(dims.get(axis)),
            visible,
        }
    })
}
