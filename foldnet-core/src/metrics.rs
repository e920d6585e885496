/// Surface area and volume readouts derived from box extents
use serde::{Deserialize, Serialize};

use crate::dimensions::BoxDimensions;

/// Which formula the readout shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathMode {
    #[default]
    None,
    LateralArea,
    TotalArea,
    Volume,
}

impl MathMode {
    /// Cycle None -> lateral -> total -> volume -> None.
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::LateralArea,
            Self::LateralArea => Self::TotalArea,
            Self::TotalArea => Self::Volume,
            Self::Volume => Self::None,
        }
    }
}

/// Lateral area, total area and volume, each rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub lateral_area: f32,
    pub total_area: f32,
    pub volume: f32,
}

impl Metrics {
    pub fn from_dimensions(dims: &BoxDimensions) -> Self {
        let (l, w, h) = (dims.length(), dims.width(), dims.height());
        let lateral_area = round2(2.0 * (l + w) * h);
        // Total area builds on the already rounded lateral area.
        let total_area = round2(lateral_area + 2.0 * (l * w));
        let volume = round2(l * w * h);
        Self {
            lateral_area,
            total_area,
            volume,
        }
    }

    /// Formula card for the given mode, or `None` when the readout is off.
    pub fn readout(&self, dims: &BoxDimensions, mode: MathMode) -> Option<Readout> {
        let (l, w, h) = (dims.length(), dims.width(), dims.height());
        let readout = match mode {
            MathMode::None => return None,
            MathMode::LateralArea => Readout {
                title: "LATERAL SURFACE AREA",
                formula: "Sxq = 2 × (L + W) × H",
                calculation: format!("Sxq = 2 × ({l} + {w}) × {h} ="),
                result: self.lateral_area,
                unit: "cm²",
            },
            MathMode::TotalArea => Readout {
                title: "TOTAL SURFACE AREA",
                formula: "Stp = Sxq + 2 × (L × W)",
                calculation: format!("Stp = {} + 2 × ({l} × {w}) =", self.lateral_area),
                result: self.total_area,
                unit: "cm²",
            },
            MathMode::Volume => Readout {
                title: "VOLUME",
                formula: "V = L × W × H",
                calculation: format!("V = {l} × {w} × {h} ="),
                result: self.volume,
                unit: "cm³",
            },
        };
        Some(readout)
    }
}

/// A formula with the current extents substituted in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub title: &'static str,
    pub formula: &'static str,
    pub calculation: String,
    pub result: f32,
    pub unit: &'static str,
}

impl Readout {
    /// Single line form used by the terminal HUD.
    pub fn line(&self) -> String {
        format!("{} {:.2} {}", self.calculation, self.result, self.unit)
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prism_metrics() {
        let m = BoxDimensions::PRISM.metrics();
        assert_relative_eq!(m.lateral_area, 15.0, epsilon = 1e-4);
        assert_relative_eq!(m.total_area, 27.0, epsilon = 1e-4);
        assert_relative_eq!(m.volume, 9.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cube_metrics() {
        let m = BoxDimensions::CUBE.metrics();
        assert_relative_eq!(m.lateral_area, 16.0, epsilon = 1e-4);
        assert_relative_eq!(m.total_area, 24.0, epsilon = 1e-4);
        assert_relative_eq!(m.volume, 8.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let dims = BoxDimensions::new(1.234, 1.0, 1.0).unwrap();
        let m = dims.metrics();
        assert_relative_eq!(m.volume, 1.23, epsilon = 1e-4);
        assert_relative_eq!(m.lateral_area, 4.47, epsilon = 1e-4);
    }

    #[test]
    fn test_readout() {
        let dims = BoxDimensions::PRISM;
        let m = dims.metrics();
        assert!(m.readout(&dims, MathMode::None).is_none());

        let volume = m.readout(&dims, MathMode::Volume).unwrap();
        assert_eq!(volume.calculation, "V = 3 × 2 × 1.5 =");
        assert_eq!(volume.unit, "cm³");
        assert_eq!(volume.line(), "V = 3 × 2 × 1.5 = 9.00 cm³");

        let total = m.readout(&dims, MathMode::TotalArea).unwrap();
        assert_eq!(total.calculation, "Stp = 15 + 2 × (3 × 2) =");
        assert_eq!(MathMode::Volume.next(), MathMode::None);
    }
}
