/// Terminal viewer for folding box nets
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use foldnet_core::{
    BoxDimensions, Camera, DimensionAxis, FoldAnimator, FoldDirection, FoldedScene, RotationState,
    SceneConfig, Transform, ViewerCommand,
};
use nalgebra::Matrix4;
use std::fs;
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;
const ORBIT_STEP: f32 = 0.1;
const AUTO_ROTATE_STEP: f32 = 0.01;
/// Progress change for the manual `[` and `]` keys.
const MANUAL_STEP: f32 = 0.05;
/// Rows reserved for the HUD: two at the top, one at the bottom.
const HUD_ROWS: u16 = 3;

const HELP: &str = "U/F unfold/fold  Space stop  [ ] step  N/P net  C shape  Y style  T/G/V/M/B/H toggles  J/K/I(+Shift) L/W/H  X shot  0 reset  Q quit";

/// Main application struct for the terminal fold viewer
pub struct TerminalApp {
    config: SceneConfig,
    animator: FoldAnimator,
    rotation: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    commands: Vec<ViewerCommand>,
    status: Option<String>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: SceneConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(config, width, height))
    }

    /// Viewer for a terminal of `width × height` cells.
    pub fn with_size(config: SceneConfig, width: u16, height: u16) -> Self {
        let rows = height.saturating_sub(HUD_ROWS).max(1);
        let mut camera = Camera::new(width as u32, rows as u32);
        camera.aspect /= CELL_ASPECT;

        Self {
            config,
            animator: FoldAnimator::new(),
            rotation: RotationState::zero(),
            camera,
            renderer: AsciiRenderer::new(width as usize, rows as usize),
            commands: Vec::new(),
            status: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn animator(&self) -> &FoldAnimator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut FoldAnimator {
        &mut self.animator
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        info!(pattern = %self.config.pattern, "viewer started");

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        info!("viewer stopped");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            // Update
            self.update();
            self.render()?;
            self.run_commands();

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        let config = &mut self.config;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,

            KeyCode::Char('w') | KeyCode::Up => self.rotation.rotate(ORBIT_STEP, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.rotation.rotate(-ORBIT_STEP, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.rotation.rotate(0.0, -ORBIT_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.rotation.rotate(0.0, ORBIT_STEP, 0.0),
            KeyCode::Char('e') => self.rotation.rotate(0.0, 0.0, ORBIT_STEP),
            KeyCode::Char('r') => self.rotation.rotate(0.0, 0.0, -ORBIT_STEP),

            KeyCode::Char('u') => self.animator.play(FoldDirection::Unfold),
            KeyCode::Char('f') => self.animator.play(FoldDirection::Fold),
            KeyCode::Char(' ') => self.animator.stop(),
            KeyCode::Char('[') => {
                self.animator.stop();
                config.set_progress(config.progress.value() - MANUAL_STEP);
            }
            KeyCode::Char(']') => {
                self.animator.stop();
                config.set_progress(config.progress.value() + MANUAL_STEP);
            }

            KeyCode::Char('n') => {
                self.animator.stop();
                config.select_pattern(config.pattern.next());
            }
            KeyCode::Char('p') => {
                self.animator.stop();
                config.select_pattern(config.pattern.previous());
            }
            KeyCode::Char('c') => {
                self.animator.stop();
                config.select_shape(config.shape.toggled());
            }

            KeyCode::Char('y') => config.label_style = config.label_style.next(),
            KeyCode::Char('t') => config.show_labels = !config.show_labels,
            KeyCode::Char('g') => config.show_wireframe = !config.show_wireframe,
            KeyCode::Char('v') => config.show_vertices = !config.show_vertices,
            KeyCode::Char('m') => config.show_dimensions = !config.show_dimensions,
            KeyCode::Char('b') => config.show_grid = !config.show_grid,
            KeyCode::Char('h') => config.math_mode = config.math_mode.next(),
            KeyCode::Char('o') => config.auto_rotate = !config.auto_rotate,
            KeyCode::Char('z') => self.camera.mode = self.camera.mode.toggled(),

            KeyCode::Char(c @ ('j' | 'J' | 'k' | 'K' | 'i' | 'I')) => {
                let axis = match c.to_ascii_lowercase() {
                    'j' => DimensionAxis::Length,
                    'k' => DimensionAxis::Width,
                    _ => DimensionAxis::Height,
                };
                let step = if c.is_ascii_uppercase() {
                    foldnet_core::dimensions::EXTENT_STEP
                } else {
                    -foldnet_core::dimensions::EXTENT_STEP
                };
                config.nudge_dimension(axis, step);
            }

            KeyCode::Char('x') => self.commands.push(ViewerCommand::Screenshot),
            KeyCode::Char('0') => self.commands.push(ViewerCommand::ResetCamera),
            _ => {}
        }
    }

    /// One frame of state change: animation and auto-rotation.
    pub fn update(&mut self) {
        if self.animator.is_playing() {
            self.config.progress = self.animator.tick(self.config.progress);
        }
        if self.config.auto_rotate {
            self.rotation.rotate(0.0, AUTO_ROTATE_STEP, 0.0);
        }
    }

    /// Orbit rotation around the middle of the scene's faces.
    fn orbit_matrix(&self, scene: &FoldedScene) -> Matrix4<f32> {
        let center = scene_center(scene);
        Transform::rotation_matrix(&self.rotation) * Matrix4::new_translation(&-center)
    }

    pub fn draw_frame(&mut self) {
        let scene = self.config.build_scene();
        let orbit = self.orbit_matrix(&scene);
        self.renderer.clear();
        self.renderer
            .render_scene(&scene, &orbit, &self.camera, self.config.show_grid);
    }

    fn render(&mut self) -> io::Result<()> {
        self.draw_frame();

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout, 2)?;

        // Draw UI overlay
        let (width, height) = terminal::size()?;
        let width = width as usize;
        let fit = |line: String| line.chars().take(width).collect::<String>();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(fit(self.status_line())),
            cursor::MoveTo(0, 1),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Cyan),
            Print(fit(self.detail_line())),
            cursor::MoveTo(0, height.saturating_sub(1)),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(fit(HELP.to_string())),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    pub fn status_line(&self) -> String {
        let config = &self.config;
        let motion = match self.animator.direction() {
            Some(FoldDirection::Unfold) => "unfolding",
            Some(FoldDirection::Fold) => "folding",
            None => "paused",
        };
        format!(
            "Foldnet | {} {} ({}) | {:?} | progress {:.2} | {} | FPS {:.1}",
            config.pattern,
            config.pattern.description(),
            config.pattern.family().label(),
            config.shape,
            config.progress.value(),
            motion,
            self.fps
        )
    }

    pub fn detail_line(&self) -> String {
        if let Some(status) = &self.status {
            return status.clone();
        }
        match self.config.readout() {
            Some(readout) => format!("{}: {}", readout.title, readout.line()),
            None => {
                let dims = self.config.effective_dimensions();
                format!(
                    "L {:.1}  W {:.1}  H {:.1}  | labels {}",
                    dims.length(),
                    dims.width(),
                    dims.height(),
                    self.config.label_style
                )
            }
        }
    }

    /// Act on the one-shot commands queued by the last key presses.
    pub fn run_commands(&mut self) {
        for command in std::mem::take(&mut self.commands) {
            debug!(?command, "viewer command");
            match command {
                ViewerCommand::Screenshot => {
                    self.status = Some(match self.save_screenshot() {
                        Ok(path) => format!("saved {}", path.display()),
                        Err(err) => format!("screenshot failed: {err}"),
                    });
                }
                ViewerCommand::ResetCamera => {
                    self.rotation = RotationState::zero();
                    self.camera.reset();
                    self.status = None;
                }
            }
        }
    }

    fn save_screenshot(&self) -> io::Result<PathBuf> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let path = PathBuf::from(format!("foldnet-{}-{stamp}.txt", self.config.pattern));
        fs::write(&path, self.renderer.frame_text())?;
        info!(path = %path.display(), "screenshot saved");
        Ok(path)
    }

    pub fn frame_text(&self) -> String {
        self.renderer.frame_text()
    }
}

/// Centre of the bounding box of every face corner.
pub fn scene_center(scene: &FoldedScene) -> nalgebra::Vector3<f32> {
    let mut min = nalgebra::Vector3::repeat(f32::INFINITY);
    let mut max = nalgebra::Vector3::repeat(f32::NEG_INFINITY);
    for face in &scene.faces {
        for corner in foldnet_core::Corner::ALL {
            let local = corner.position(face.primitive.width, face.primitive.height);
            let p = face.transform.transform_point(&local).coords;
            min = min.inf(&p);
            max = max.sup(&p);
        }
    }
    if scene.faces.is_empty() {
        nalgebra::Vector3::zeros()
    } else {
        (min + max) / 2.0
    }
}

/// Plain-text description of a scene, for `--summary`.
pub fn scene_summary(scene: &FoldedScene) -> String {
    let dims: &BoxDimensions = &scene.dimensions;
    let mut lines = vec![
        format!(
            "{} {} ({})",
            scene.pattern,
            scene.pattern.description(),
            scene.pattern.family().label()
        ),
        format!(
            "dimensions L {:.2} W {:.2} H {:.2}",
            dims.length(),
            dims.width(),
            dims.height()
        ),
        format!(
            "progress {:.2}  hinge angle {:.1} deg",
            scene.progress.value(),
            scene.hinge_angle.to_degrees()
        ),
        format!(
            "lateral area {:.2}  total area {:.2}  volume {:.2}",
            scene.metrics.lateral_area, scene.metrics.total_area, scene.metrics.volume
        ),
    ];
    for face in &scene.faces {
        let c = face.transform.transform_point(&nalgebra::Point3::origin());
        let n = face.transform.transform_vector(&nalgebra::Vector3::z()).normalize();
        let parent = face
            .parent
            .map_or_else(|| "root".to_string(), |p| format!("on {p}"));
        lines.push(format!(
            "face {} {:<5} {:.2}x{:.2} centre ({:6.2} {:6.2} {:6.2}) normal ({:5.2} {:5.2} {:5.2})",
            face.index,
            parent,
            face.primitive.width,
            face.primitive.height,
            c.x,
            c.y,
            c.z,
            n.x,
            n.y,
            n.z
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use foldnet_core::{FoldProgress, LabelStyle, MathMode, NetPattern, ShapeKind};

    fn app() -> TerminalApp {
        TerminalApp::with_size(SceneConfig::default(), 80, 30)
    }

    fn press(app: &mut TerminalApp, c: char) {
        let modifiers = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        app.handle_key(KeyEvent::new(KeyCode::Char(c), modifiers));
    }

    #[test]
    fn test_unfold_runs_to_flat() {
        let mut app = app();
        press(&mut app, 'u');
        for _ in 0..100 {
            app.update();
        }
        assert_eq!(app.config().progress, FoldProgress::FLAT);
        assert!(!app.animator().is_playing());
    }

    #[test]
    fn test_manual_step_stops_animation() {
        let mut app = app();
        press(&mut app, 'f');
        press(&mut app, '[');
        assert!(!app.animator().is_playing());
        assert!((app.config().progress.value() - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_pattern_keys_cycle_and_apply_presets() {
        let mut app = app();
        press(&mut app, 'p');
        assert_eq!(app.config().pattern, NetPattern::Net11);
        assert_eq!(app.config().dimensions, BoxDimensions::ELONGATED);
        press(&mut app, 'n');
        press(&mut app, 'n');
        assert_eq!(app.config().pattern, NetPattern::Net2);
        assert_eq!(app.config().dimensions, BoxDimensions::PRISM);
    }

    #[test]
    fn test_toggles() {
        let mut app = app();
        press(&mut app, 'c');
        assert_eq!(app.config().shape, ShapeKind::Cube);
        press(&mut app, 'y');
        assert_eq!(app.config().label_style, LabelStyle::Letters);
        press(&mut app, 'h');
        assert_eq!(app.config().math_mode, MathMode::LateralArea);
        press(&mut app, 't');
        assert!(!app.config().show_labels);
        press(&mut app, 'q');
        assert!(!app.is_running());
    }

    #[test]
    fn test_dimension_keys() {
        let mut app = app();
        press(&mut app, 'J');
        press(&mut app, 'k');
        let dims = app.config().dimensions;
        assert!((dims.length() - 3.1).abs() < 1e-6);
        assert!((dims.width() - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_reset_camera_command() {
        let mut app = app();
        press(&mut app, 'a');
        press(&mut app, '0');
        app.run_commands();
        assert_eq!(app.rotation, RotationState::zero());
    }

    #[test]
    fn test_frame_and_hud() {
        let mut app = app();
        app.draw_frame();
        assert!(!app.frame_text().trim().is_empty());
        assert!(app.status_line().contains("NET_1 Cross (1-4-1)"));
        assert!(app.detail_line().contains("L 3.0"));
        app.config.math_mode = MathMode::Volume;
        assert!(app.detail_line().starts_with("VOLUME"));
    }

    #[test]
    fn test_summary_lists_every_face() {
        let scene = SceneConfig::default().build_scene();
        let summary = scene_summary(&scene);
        assert_eq!(summary.lines().count(), 4 + 6);
        assert!(summary.contains("volume 9.00"));
        assert!(summary.contains("hinge angle 45.0 deg"));
    }

    #[test]
    fn test_flat_scene_center() {
        let mut config = SceneConfig::default();
        config.set_progress(1.0);
        let center = scene_center(&config.build_scene());
        // NET_1 flat spans z from -4.5 to 2.5 and x from -3 to 3.
        assert!((center.z + 1.0).abs() < 1e-4);
        assert!(center.x.abs() < 1e-4);
    }
}
