/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::Transform;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Orthographic => Self::Perspective,
            Self::Perspective => Self::Orthographic,
        }
    }
}

/// Where the camera starts, looking down at the net from above and in front.
pub const HOME_POSITION: Point3<f32> = Point3::new(6.0, 8.0, 8.0);

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: HOME_POSITION,
            target: Point3::origin(),
            up: Vector3::y(),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Back to the home position, keeping aspect and projection mode.
    pub fn reset(&mut self) {
        self.position = HOME_POSITION;
        self.target = Point3::origin();
        self.up = Vector3::y();
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                // Frame the same slice of the scene the perspective view shows at the target.
                let distance = (self.position - self.target).norm();
                let height = 2.0 * distance * (self.fov / 2.0).tan();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Rotation that turns a flat object at `anchor` to face the camera.
    ///
    /// Text drawn in the object's XY plane ends up parallel to the screen
    /// with its +Y along the screen's up direction.
    pub fn billboard_matrix(&self, anchor: &Point3<f32>) -> Matrix4<f32> {
        let view = self.view_matrix();
        let to_world = view.fixed_view::<3, 3>(0, 0).transpose().to_homogeneous();
        Matrix4::new_translation(&anchor.coords) * to_world
    }

    /// Project a 3D point to 2D screen space
    ///
    /// Returns the pixel position and the normalised device depth, or `None`
    /// when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = Transform::mvp_matrix(
            model_matrix,
            &self.view_matrix(),
            &self.projection_matrix(),
        );

        // Reject points behind the eye before the perspective divide.
        let clip = mvp * point.to_homogeneous();
        if clip.w.abs() < 1e-6 || (self.mode == ProjectionMode::Perspective && clip.w < 0.0) {
            return None;
        }
        let ndc = clip.xyz() / clip.w;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc.x)
            || !(-1.0..=1.0).contains(&ndc.y)
            || !(-1.0..=1.0).contains(&ndc.z)
        {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.position, HOME_POSITION);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_target_projects_to_screen_centre() {
        let camera = Camera::new(800, 600);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert_relative_eq!(x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(y, 300.0, epsilon = 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let camera = Camera::new(800, 600);
        let behind = Point3::new(12.0, 16.0, 16.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());
    }

    #[test]
    fn test_nearer_points_have_smaller_depth() {
        let camera = Camera::new(800, 600);
        let model = Matrix4::identity();
        let towards = HOME_POSITION.coords.normalize();
        let near = Point3::from(towards * 2.0);
        let far = Point3::from(-towards * 2.0);
        let (_, _, dn) = camera.project_to_screen(&near, &model, 800, 600).unwrap();
        let (_, _, df) = camera.project_to_screen(&far, &model, 800, 600).unwrap();
        assert!(dn < df);
    }

    #[test]
    fn test_billboard_faces_camera() {
        let camera = Camera::default();
        let anchor = Point3::new(1.0, 0.0, 2.0);
        let billboard = camera.billboard_matrix(&anchor);

        assert_relative_eq!(billboard.transform_point(&Point3::origin()), anchor);
        let facing = billboard.transform_vector(&Vector3::z());
        let to_camera = (camera.position - camera.target).normalize();
        assert_relative_eq!(facing, to_camera, epsilon = 1e-5);
    }

    #[test]
    fn test_reset_restores_home() {
        let mut camera = Camera::default();
        camera.position = Point3::new(0.0, 1.0, 2.0);
        camera.mode = ProjectionMode::Orthographic;
        camera.reset();
        assert_eq!(camera.position, HOME_POSITION);
        assert_eq!(camera.mode, ProjectionMode::Orthographic);
    }
}
