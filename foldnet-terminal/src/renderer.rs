/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use foldnet_core::face::LabelSide;
use foldnet_core::{Camera, FacePrimitive, FoldedScene, Mesh, Rgb, Triangle};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Lets markers, edges and labels win against the slab they sit on.
const DEPTH_BIAS: f32 = 1e-3;

const GRID_EXTENT: i32 = 8;
const GRID_HEIGHT: f32 = -0.03;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// ASCII renderer that converts a folded scene to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Draw every face of the scene, then the overlays on top.
    pub fn render_scene(
        &mut self,
        scene: &FoldedScene,
        orbit: &Matrix4<f32>,
        camera: &Camera,
        show_grid: bool,
    ) {
        if show_grid {
            self.render_grid(orbit, camera);
        }

        for face in &scene.faces {
            let model = orbit * face.transform;
            let tint = face.primitive.material.color;
            self.render_mesh(&face.primitive.slab, &model, camera, tint);
        }

        // Decorations go in a second pass so they can sit on any slab.
        for face in &scene.faces {
            let model = orbit * face.transform;
            self.render_decorations(&face.primitive, &model, camera);
        }

        for overlay in &scene.overlays {
            let anchor = orbit.transform_point(&overlay.anchor);
            if let Some((x, y, _)) = self.project(&anchor, camera) {
                self.put_text(x, y, &overlay.text, Color::Yellow, None);
            }
        }
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, model_matrix: &Matrix4<f32>, camera: &Camera, tint: Rgb) {
        let eye = (camera.position - camera.target).normalize();
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, camera, &eye, tint);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        eye: &Vector3<f32>,
        tint: Rgb,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(projected) => *slot = projected,
                None => return, // Triangle is clipped
            }
        }

        // Faces are double sided, so either side catches the light.
        let normal = model_matrix
            .transform_vector(&triangle.calculate_normal())
            .normalize();
        let brightness = normal.dot(eye).abs();

        // Map brightness to character, skipping the blank end of the ramp
        let span = (LUMINOSITY_RAMP.len() - 3) as f32;
        let char_index = 2 + (brightness * span).round() as usize;
        let character = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

        let cell = Cell {
            ch: character,
            color: shade(tint, 0.5 + 0.5 * brightness),
        };
        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x as usize, y as usize, depth, cell);
                    }
                }
            }
        }
    }

    fn render_decorations(&mut self, face: &FacePrimitive, model: &Matrix4<f32>, camera: &Camera) {
        let edge_color = to_color(face.outline_color);
        for [a, b] in &face.outline {
            self.render_line(&model.transform_point(a), &model.transform_point(b), camera, '+', edge_color);
        }

        for marker in &face.corners {
            let p = model.transform_point(&marker.position);
            if let Some((x, y, depth)) = self.project(&p, camera) {
                self.plot_biased(x as usize, y as usize, depth, 'o', to_color(marker.color));
            }
        }

        // Only the copy printed on the side facing the camera is readable.
        for side in [LabelSide::Front, LabelSide::Back] {
            let Some(label) = face.label(side) else {
                continue;
            };
            let placement = model * label.transform;
            let origin = placement.transform_point(&Point3::origin());
            let facing = placement.transform_vector(&Vector3::z());
            if facing.dot(&(camera.position - origin)) <= 0.0 {
                continue;
            }
            if let Some((x, y, depth)) = self.project(&origin, camera) {
                self.put_text(x, y, &label.text, to_color(label.color), Some(depth));
            }
        }
    }

    fn render_grid(&mut self, orbit: &Matrix4<f32>, camera: &Camera) {
        let reach = GRID_EXTENT as f32;
        for i in -GRID_EXTENT..=GRID_EXTENT {
            let t = i as f32;
            let lines = [
                (Point3::new(t, GRID_HEIGHT, -reach), Point3::new(t, GRID_HEIGHT, reach)),
                (Point3::new(-reach, GRID_HEIGHT, t), Point3::new(reach, GRID_HEIGHT, t)),
            ];
            for (a, b) in lines {
                let (a, b) = (orbit.transform_point(&a), orbit.transform_point(&b));
                self.render_line(&a, &b, camera, '.', Color::DarkGrey);
            }
        }
    }

    fn render_line(&mut self, a: &Point3<f32>, b: &Point3<f32>, camera: &Camera, ch: char, color: Color) {
        let (Some(pa), Some(pb)) = (self.project(a, camera), self.project(b, camera)) else {
            return;
        };
        let steps = (pb.0 - pa.0).abs().max((pb.1 - pa.1).abs()).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = pa.0 + (pb.0 - pa.0) * t;
            let y = pa.1 + (pb.1 - pa.1) * t;
            let depth = pa.2 + (pb.2 - pa.2) * t;
            if x >= 0.0 && y >= 0.0 {
                self.plot_biased(x as usize, y as usize, depth, ch, color);
            }
        }
    }

    /// Text centred on a screen position. With a depth it is hidden behind
    /// nearer geometry.
    fn put_text(&mut self, x: f32, y: f32, text: &str, color: Color, depth: Option<f32>) {
        let len = text.chars().count() as f32;
        let start = (x - len / 2.0).round() as i32;
        let row = y as usize;
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i32;
            if col < 0 {
                continue;
            }
            match depth {
                Some(depth) => self.plot_biased(col as usize, row, depth, ch, color),
                None => {
                    if let Some(idx) = self.index(col as usize, row) {
                        self.cells[idx] = Cell { ch, color };
                    }
                }
            }
        }
    }

    fn project(&self, point: &Point3<f32>, camera: &Camera) -> Option<(f32, f32, f32)> {
        camera.project_to_screen(
            point,
            &Matrix4::identity(),
            self.width as u32,
            self.height as u32,
        )
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    fn plot(&mut self, x: usize, y: usize, depth: f32, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            if depth < self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.cells[idx] = cell;
            }
        }
    }

    fn plot_biased(&mut self, x: usize, y: usize, depth: f32, ch: char, color: Color) {
        if let Some(idx) = self.index(x, y) {
            if depth - DEPTH_BIAS < self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth.min(self.depth_buffer[idx]);
                self.cells[idx] = Cell { ch, color };
            }
        }
    }

    /// The frame as plain text, one line per row.
    pub fn frame_text(&self) -> String {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                let line: String = row.iter().map(|c| c.ch).collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Queue the frame with its first row at terminal row `top`.
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(MoveTo(0, top + y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn shade(rgb: Rgb, factor: f32) -> Color {
    let scale = |c: u8| (c as f32 * factor.clamp(0.0, 1.0)).round() as u8;
    Color::Rgb {
        r: scale(rgb.r),
        g: scale(rgb.g),
        b: scale(rgb.b),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
