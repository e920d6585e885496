/// Face label text and the per-face orientation table
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLabelStyle;
use crate::FACE_COUNT;

/// What to print on each face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// 1 to 6
    #[default]
    Numbers,
    /// A to F
    Letters,
    /// I to VI
    Roman,
    Blank,
}

impl LabelStyle {
    pub const ALL: [LabelStyle; 4] = [Self::Numbers, Self::Letters, Self::Roman, Self::Blank];

    pub fn next(self) -> Self {
        match self {
            Self::Numbers => Self::Letters,
            Self::Letters => Self::Roman,
            Self::Roman => Self::Blank,
            Self::Blank => Self::Numbers,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Numbers => "numbers",
            Self::Letters => "letters",
            Self::Roman => "roman",
            Self::Blank => "blank",
        }
    }
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LabelStyle {
    type Err = UnknownLabelStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLabelStyle(s.to_string()))
    }
}

const ROMAN: [&str; FACE_COUNT] = ["I", "II", "III", "IV", "V", "VI"];

/// Upright rotation of each face's label, in degrees about the face normal.
///
/// Shared by every pattern.
const LABEL_ROTATION_DEGREES: [f32; FACE_COUNT] = [0.0, 0.0, 180.0, -90.0, 90.0, 180.0];

/// Text printed on face `index`, empty when labels are hidden or blank.
pub fn label_text(show_labels: bool, style: LabelStyle, index: usize) -> String {
    if !show_labels || index >= FACE_COUNT {
        return String::new();
    }
    match style {
        LabelStyle::Blank => String::new(),
        LabelStyle::Numbers => (index + 1).to_string(),
        LabelStyle::Letters => char::from(b'A' + index as u8).to_string(),
        LabelStyle::Roman => ROMAN[index].to_string(),
    }
}

/// Rotation in radians applied to the label on face `index`.
pub fn label_rotation(index: usize) -> f32 {
    LABEL_ROTATION_DEGREES
        .get(index)
        .map_or(0.0, |deg| deg.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_label_text_styles() {
        assert_eq!(label_text(true, LabelStyle::Roman, 3), "IV");
        assert_eq!(label_text(true, LabelStyle::Letters, 0), "A");
        assert_eq!(label_text(true, LabelStyle::Letters, 5), "F");
        assert_eq!(label_text(true, LabelStyle::Numbers, 5), "6");
    }

    #[test]
    fn test_blank_and_hidden_are_empty() {
        for index in 0..FACE_COUNT {
            assert_eq!(label_text(true, LabelStyle::Blank, index), "");
            for style in LabelStyle::ALL {
                assert_eq!(label_text(false, style, index), "");
            }
        }
    }

    #[test]
    fn test_out_of_range_is_empty() {
        assert_eq!(label_text(true, LabelStyle::Roman, 6), "");
        assert_eq!(label_text(true, LabelStyle::Numbers, 42), "");
    }

    #[test]
    fn test_rotation_table() {
        assert_eq!(label_rotation(0), 0.0);
        assert_eq!(label_rotation(1), 0.0);
        assert_relative_eq!(label_rotation(2), PI, epsilon = 1e-6);
        assert_relative_eq!(label_rotation(3), -FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(label_rotation(4), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(label_rotation(5), PI, epsilon = 1e-6);
        assert_eq!(label_rotation(9), 0.0);
    }

    #[test]
    fn test_parse_style() {
        assert_eq!("ROMAN".parse(), Ok(LabelStyle::Roman));
        let err = "emoji".parse::<LabelStyle>().unwrap_err();
        assert_eq!(err, UnknownLabelStyle("emoji".into()));
        assert!(err.to_string().contains("roman"));
        assert_eq!(LabelStyle::Blank.next(), LabelStyle::Numbers);
    }
}
