/// The configuration record a viewer hands to the core, and the transitions
/// its controls apply to it.
///
/// Every field has a default, so a TOML file only needs the values it
/// changes:
///
/// ```toml
/// shape = "rectangular_prism"
/// pattern = "NET_10"
/// progress = 0.25
///
/// [dimensions]
/// length = 2.0
/// width = 2.0
/// height = 2.0
/// ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{resolve_label_color, resolve_palette, Rgb, DEFAULT_PALETTE};
use crate::dimensions::{BoxDimensions, DimensionAxis};
use crate::error::ConfigError;
use crate::face::DEFAULT_OPACITY;
use crate::fold::FoldProgress;
use crate::label::LabelStyle;
use crate::metrics::{MathMode, Metrics, Readout};
use crate::pattern::NetPattern;
use crate::shape::{FoldableBox, FoldableCube, FoldedScene, NetStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Cube,
    #[default]
    RectangularPrism,
}

impl ShapeKind {
    pub fn toggled(self) -> Self {
        match self {
            Self::Cube => Self::RectangularPrism,
            Self::RectangularPrism => Self::Cube,
        }
    }

    pub fn default_dimensions(self) -> BoxDimensions {
        match self {
            Self::Cube => BoxDimensions::CUBE,
            Self::RectangularPrism => BoxDimensions::PRISM,
        }
    }
}

/// One-shot requests for the presentation layer.
///
/// The core never acts on these; it only passes them along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerCommand {
    /// Save the current frame.
    Screenshot,
    /// Put the camera back at its home position.
    ResetCamera,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub shape: ShapeKind,
    pub pattern: NetPattern,
    pub progress: FoldProgress,
    /// Six hex strings, one per face. Anything else falls back to the
    /// default palette when the scene is built.
    pub colors: Vec<String>,
    pub opacity: f32,
    pub show_wireframe: bool,
    pub show_vertices: bool,
    pub show_labels: bool,
    pub label_style: LabelStyle,
    /// Hex string; falls back to white when unparsable.
    pub label_color: String,
    pub show_dimensions: bool,
    pub show_grid: bool,
    pub auto_rotate: bool,
    pub merge_shared_corners: bool,
    pub math_mode: MathMode,
    /// Last so it serialises as a trailing `[dimensions]` table.
    pub dimensions: BoxDimensions,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::RectangularPrism,
            pattern: NetPattern::Net1,
            progress: FoldProgress::HALF,
            dimensions: BoxDimensions::PRISM,
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            opacity: DEFAULT_OPACITY,
            show_wireframe: true,
            show_vertices: true,
            show_labels: true,
            label_style: LabelStyle::Numbers,
            label_color: Rgb::WHITE.to_string(),
            show_dimensions: false,
            show_grid: true,
            auto_rotate: false,
            merge_shared_corners: true,
            math_mode: MathMode::None,
        }
    }
}

impl SceneConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), pattern = %config.pattern, "loaded config");
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Switch nets. A prism takes the net's dimension preset; a cube keeps
    /// its size. Progress goes back to half open.
    pub fn select_pattern(&mut self, pattern: NetPattern) {
        self.pattern = pattern;
        if self.shape == ShapeKind::RectangularPrism {
            let preset = pattern.preset_dimensions();
            if preset != self.dimensions {
                debug!(%pattern, ?preset, "applying dimension preset");
            }
            self.dimensions = preset;
        }
        self.progress = FoldProgress::HALF;
    }

    pub fn select_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
        self.dimensions = shape.default_dimensions();
        self.progress = FoldProgress::HALF;
        debug!(?shape, "shape selected");
    }

    /// Set one extent, rounded to a tenth and clamped to the editable range.
    pub fn set_dimension(&mut self, axis: DimensionAxis, value: f32) {
        self.dimensions = self.dimensions.with(axis, value);
    }

    pub fn nudge_dimension(&mut self, axis: DimensionAxis, delta: f32) {
        let current = self.dimensions.get(axis);
        self.set_dimension(axis, current + delta);
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = FoldProgress::new(progress);
    }

    /// Extents the built scene actually uses.
    pub fn effective_dimensions(&self) -> BoxDimensions {
        match self.shape {
            ShapeKind::Cube => {
                let size = self.dimensions.length();
                BoxDimensions::from_unchecked(size, size, size)
            }
            ShapeKind::RectangularPrism => self.dimensions,
        }
    }

    pub fn style(&self) -> NetStyle {
        NetStyle {
            palette: resolve_palette(&self.colors),
            opacity: self.opacity.clamp(0.0, 1.0),
            show_wireframe: self.show_wireframe,
            show_vertices: self.show_vertices,
            show_labels: self.show_labels,
            label_style: self.label_style,
            label_color: resolve_label_color(&self.label_color),
            show_dimensions: self.show_dimensions,
            merge_shared_corners: self.merge_shared_corners,
        }
    }

    pub fn build_scene(&self) -> FoldedScene {
        match self.shape {
            ShapeKind::Cube => {
                FoldableCube::from_length(&self.dimensions, self.pattern, self.progress)
                    .with_style(self.style())
                    .build()
            }
            ShapeKind::RectangularPrism => {
                FoldableBox::new(self.dimensions, self.pattern, self.progress)
                    .with_style(self.style())
                    .build()
            }
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.effective_dimensions().metrics()
    }

    pub fn readout(&self) -> Option<Readout> {
        let dims = self.effective_dimensions();
        dims.metrics().readout(&dims, self.math_mode)
    }
}
