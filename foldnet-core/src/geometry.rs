/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Two triangles covering the quad `a b c d` (counter-clockwise seen
    /// from the side `normal` points to).
    fn add_quad(&mut self, corners: [Point3<f32>; 4], normal: Vector3<f32>) {
        let v = |p: Point3<f32>| Vertex {
            position: p,
            normal,
        };
        let [a, b, c, d] = corners;
        self.add_triangle(Triangle::new(v(a), v(b), v(c)));
        self.add_triangle(Triangle::new(v(a), v(c), v(d)));
    }

    /// Axis-aligned box centred on the origin with the given full extents
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
        let p = Point3::new;
        let mut mesh = Self::with_capacity(12);

        // Front face
        mesh.add_quad(
            [p(-hx, -hy, hz), p(hx, -hy, hz), p(hx, hy, hz), p(-hx, hy, hz)],
            Vector3::z(),
        );
        // Back face
        mesh.add_quad(
            [p(-hx, -hy, -hz), p(-hx, hy, -hz), p(hx, hy, -hz), p(hx, -hy, -hz)],
            -Vector3::z(),
        );
        // Top face
        mesh.add_quad(
            [p(-hx, hy, -hz), p(-hx, hy, hz), p(hx, hy, hz), p(hx, hy, -hz)],
            Vector3::y(),
        );
        // Bottom face
        mesh.add_quad(
            [p(-hx, -hy, -hz), p(hx, -hy, -hz), p(hx, -hy, hz), p(-hx, -hy, hz)],
            -Vector3::y(),
        );
        // Right face
        mesh.add_quad(
            [p(hx, -hy, -hz), p(hx, hy, -hz), p(hx, hy, hz), p(hx, -hy, hz)],
            Vector3::x(),
        );
        // Left face
        mesh.add_quad(
            [p(-hx, -hy, -hz), p(-hx, -hy, hz), p(-hx, hy, hz), p(-hx, hy, -hz)],
            -Vector3::x(),
        );

        mesh
    }
}

/// The twelve edges of an axis-aligned box centred on the origin
pub fn cuboid_edges(width: f32, height: f32, depth: f32) -> Vec<[Point3<f32>; 2]> {
    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    let corner = |i: usize| {
        Point3::new(
            if i & 1 == 0 { -hx } else { hx },
            if i & 2 == 0 { -hy } else { hy },
            if i & 4 == 0 { -hz } else { hz },
        )
    };

    let mut edges = Vec::with_capacity(12);
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                edges.push([corner(i), corner(i | bit)]);
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_has_twelve_outward_triangles() {
        let mesh = Mesh::cuboid(3.0, 2.0, 0.05);
        assert_eq!(mesh.triangles.len(), 12);
        for triangle in &mesh.triangles {
            let winding = triangle.calculate_normal();
            let declared = triangle.vertices[0].normal;
            assert!((winding - declared).norm() < 1e-5);
        }
    }

    #[test]
    fn test_cuboid_bounds() {
        let mesh = Mesh::cuboid(3.0, 2.0, 0.5);
        let max_x = mesh
            .triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(|v| v.position.x)
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, 1.5);
    }

    #[test]
    fn test_cuboid_edges() {
        let edges = cuboid_edges(2.0, 2.0, 2.0);
        assert_eq!(edges.len(), 12);
        for [a, b] in edges {
            assert!(((b - a).norm() - 2.0).abs() < 1e-6);
        }
    }
}
