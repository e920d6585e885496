/// Hinge rotations, translations and the viewer's orbit state
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Orbit rotation of the whole scene around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Axis a hinge turns around, expressed in the parent's hinge frame.
///
/// Nets lie in the XZ plane, so every hinge line is parallel to X or Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HingeAxis {
    X,
    Z,
}

impl HingeAxis {
    pub fn unit(self) -> Vector3<f32> {
        match self {
            Self::X => Vector3::x(),
            Self::Z => Vector3::z(),
        }
    }
}

/// Direction a hinge turns when the box closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoldSign {
    Positive,
    Negative,
}

impl FoldSign {
    pub fn factor(self) -> f32 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Rotation of `angle` radians around a single axis
    pub fn axis_rotation(axis: &Vector3<f32>, angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(axis * angle)
    }

    /// Frame of a hinge: move to the parent's edge, then turn by the signed
    /// fold angle around the hinge line.
    pub fn hinge_matrix(
        offset: &Vector3<f32>,
        axis: HingeAxis,
        sign: FoldSign,
        angle: f32,
    ) -> Matrix4<f32> {
        Matrix4::new_translation(offset) * Self::axis_rotation(&axis.unit(), sign.factor() * angle)
    }

    /// Quarter turn about X taking a face from its local XY plane into the
    /// XZ plane: local +Y goes to -Z and the front normal to +Y.
    ///
    /// Written out exactly so flat faces carry no rounding noise.
    pub fn lay_flat() -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, -1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}
