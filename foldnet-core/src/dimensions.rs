/// Box extents and the clamping rules applied by editing controls
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::metrics::Metrics;

/// Smallest extent an editing control will produce.
pub const MIN_EXTENT: f32 = 0.5;
/// Largest extent an editing control will produce.
pub const MAX_EXTENT: f32 = 6.0;
/// Increment used by stepper controls.
pub const EXTENT_STEP: f32 = 0.1;

/// One of the three box axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionAxis {
    /// Along X.
    Length,
    /// Along Z (depth).
    Width,
    /// Along Y.
    Height,
}

impl DimensionAxis {
    pub const ALL: [DimensionAxis; 3] = [Self::Length, Self::Width, Self::Height];

    pub fn name(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for DimensionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Length, width and height of a rectangular box.
///
/// Every extent is finite and strictly positive; the only ways to build one
/// either validate ([`BoxDimensions::new`]) or clamp ([`BoxDimensions::clamped`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionsRecord", into = "DimensionsRecord")]
pub struct BoxDimensions {
    length: f32,
    width: f32,
    height: f32,
}

#[derive(Serialize, Deserialize)]
struct DimensionsRecord {
    length: f32,
    width: f32,
    height: f32,
}

impl BoxDimensions {
    /// Default rectangular prism, also the preset for most nets.
    pub const PRISM: Self = Self {
        length: 3.0,
        width: 2.0,
        height: 1.5,
    };

    /// Default cube, and the preset for the stairs net.
    pub const CUBE: Self = Self {
        length: 2.0,
        width: 2.0,
        height: 2.0,
    };

    /// Elongated preset for nets with a long chain axis.
    pub const ELONGATED: Self = Self {
        length: 4.0,
        width: 1.5,
        height: 1.0,
    };

    pub fn new(length: f32, width: f32, height: f32) -> Result<Self, GeometryError> {
        Ok(Self {
            length: check_extent(DimensionAxis::Length, length)?,
            width: check_extent(DimensionAxis::Width, width)?,
            height: check_extent(DimensionAxis::Height, height)?,
        })
    }

    /// Equal extents on all three axes.
    pub fn cube(size: f32) -> Result<Self, GeometryError> {
        Self::new(size, size, size)
    }

    /// Round each extent to one decimal and clamp it into
    /// [`MIN_EXTENT`, `MAX_EXTENT`], the way the stepper controls do.
    pub fn clamped(length: f32, width: f32, height: f32) -> Self {
        Self {
            length: clamp_extent(length),
            width: clamp_extent(width),
            height: clamp_extent(height),
        }
    }

    /// Only for extents taken from another valid `BoxDimensions`.
    pub(crate) const fn from_unchecked(length: f32, width: f32, height: f32) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn get(&self, axis: DimensionAxis) -> f32 {
        match axis {
            DimensionAxis::Length => self.length,
            DimensionAxis::Width => self.width,
            DimensionAxis::Height => self.height,
        }
    }

    /// Copy with one extent replaced by a clamped value.
    pub fn with(&self, axis: DimensionAxis, value: f32) -> Self {
        let mut next = *self;
        let value = clamp_extent(value);
        match axis {
            DimensionAxis::Length => next.length = value,
            DimensionAxis::Width => next.width = value,
            DimensionAxis::Height => next.height = value,
        }
        next
    }

    pub fn is_cube(&self) -> bool {
        self.length == self.width && self.width == self.height
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from_dimensions(self)
    }
}

impl Default for BoxDimensions {
    fn default() -> Self {
        Self::PRISM
    }
}

impl TryFrom<DimensionsRecord> for BoxDimensions {
    type Error = GeometryError;

    fn try_from(record: DimensionsRecord) -> Result<Self, Self::Error> {
        Self::new(record.length, record.width, record.height)
    }
}

impl From<BoxDimensions> for DimensionsRecord {
    fn from(dims: BoxDimensions) -> Self {
        Self {
            length: dims.length,
            width: dims.width,
            height: dims.height,
        }
    }
}

fn check_extent(axis: DimensionAxis, value: f32) -> Result<f32, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositiveExtent { axis, value })
    }
}

fn clamp_extent(value: f32) -> f32 {
    if value.is_nan() {
        return MIN_EXTENT;
    }
    let rounded = (value * 10.0).round() / 10.0;
    rounded.clamp(MIN_EXTENT, MAX_EXTENT)
}
