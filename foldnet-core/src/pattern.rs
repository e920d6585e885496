/// Catalogue of the eleven cube nets and their dimension presets
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dimensions::BoxDimensions;
use crate::error::UnknownPattern;

/// Families of nets, named after how many faces sit in each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetFamily {
    /// A base with four faces around it and one opposite face.
    OneFourOne,
    OneThreeTwo,
    /// 2-2-2, every face chained to the previous one.
    Stairs,
    /// 3-3, two rows of three.
    TwoRows,
}

impl NetFamily {
    pub fn label(self) -> &'static str {
        match self {
            Self::OneFourOne => "1-4-1",
            Self::OneThreeTwo => "1-3-2",
            Self::Stairs => "2-2-2",
            Self::TwoRows => "3-3",
        }
    }
}

/// One of the eleven supported nets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NetPattern {
    #[default]
    #[serde(rename = "NET_1")]
    Net1,
    #[serde(rename = "NET_2")]
    Net2,
    #[serde(rename = "NET_3")]
    Net3,
    #[serde(rename = "NET_4")]
    Net4,
    #[serde(rename = "NET_5")]
    Net5,
    #[serde(rename = "NET_6")]
    Net6,
    #[serde(rename = "NET_7")]
    Net7,
    #[serde(rename = "NET_8")]
    Net8,
    #[serde(rename = "NET_9")]
    Net9,
    #[serde(rename = "NET_10")]
    Net10,
    #[serde(rename = "NET_11")]
    Net11,
}

impl NetPattern {
    pub const ALL: [NetPattern; 11] = [
        Self::Net1,
        Self::Net2,
        Self::Net3,
        Self::Net4,
        Self::Net5,
        Self::Net6,
        Self::Net7,
        Self::Net8,
        Self::Net9,
        Self::Net10,
        Self::Net11,
    ];

    /// 1-based catalogue number.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn family(self) -> NetFamily {
        match self {
            Self::Net1 | Self::Net2 | Self::Net3 | Self::Net4 | Self::Net5 | Self::Net6 => {
                NetFamily::OneFourOne
            }
            Self::Net7 | Self::Net8 | Self::Net9 => NetFamily::OneThreeTwo,
            Self::Net10 => NetFamily::Stairs,
            Self::Net11 => NetFamily::TwoRows,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Net1 => "Cross",
            Self::Net2 => "Offset wings on base and back",
            Self::Net3 => "T shape, wings on back",
            Self::Net4 => "Far wings on base and top",
            Self::Net5 => "Wings on top",
            Self::Net6 => "Long strip, wings on base",
            Self::Net7 => "1-3-2 type A",
            Self::Net8 => "1-3-2 type B",
            Self::Net9 => "1-3-2 type C",
            Self::Net10 => "Stairs",
            Self::Net11 => "Two rows of three",
        }
    }

    /// Extents that keep this net free of overlapping faces when flat.
    ///
    /// Advisory only: the evaluator folds any positive extents.
    pub fn preset_dimensions(self) -> BoxDimensions {
        match self {
            Self::Net10 => BoxDimensions::CUBE,
            Self::Net6 | Self::Net11 => BoxDimensions::ELONGATED,
            _ => BoxDimensions::PRISM,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for NetPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NET_{}", self.number())
    }
}

impl FromStr for NetPattern {
    type Err = UnknownPattern;

    /// Accepts `NET_3`, `net-3`, `net3` or plain `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .strip_prefix("net")
            .map(|rest| rest.trim_start_matches(['_', '-']))
            .unwrap_or(&lower);
        digits
            .parse::<usize>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| UnknownPattern(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_round_trip() {
        for (i, pattern) in NetPattern::ALL.iter().enumerate() {
            assert_eq!(pattern.number(), i + 1);
            assert_eq!(NetPattern::from_number(i + 1), Some(*pattern));
        }
        assert_eq!(NetPattern::from_number(0), None);
        assert_eq!(NetPattern::from_number(12), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("NET_10".parse(), Ok(NetPattern::Net10));
        assert_eq!("net-3".parse(), Ok(NetPattern::Net3));
        assert_eq!("11".parse(), Ok(NetPattern::Net11));
        assert!("net_0".parse::<NetPattern>().is_err());
        let err = "cross".parse::<NetPattern>().unwrap_err();
        assert_eq!(err, UnknownPattern("cross".into()));
        assert_eq!(
            err.to_string(),
            "unknown net pattern \"cross\" (expected NET_1 to NET_11)"
        );
        assert_eq!(NetPattern::Net7.to_string(), "NET_7");
    }

    #[test]
    fn test_families() {
        let count = |family| {
            NetPattern::ALL
                .iter()
                .filter(|p| p.family() == family)
                .count()
        };
        assert_eq!(count(NetFamily::OneFourOne), 6);
        assert_eq!(count(NetFamily::OneThreeTwo), 3);
        assert_eq!(count(NetFamily::Stairs), 1);
        assert_eq!(count(NetFamily::TwoRows), 1);
    }

    #[test]
    fn test_presets() {
        assert_eq!(NetPattern::Net10.preset_dimensions(), BoxDimensions::CUBE);
        assert_eq!(NetPattern::Net6.preset_dimensions(), BoxDimensions::ELONGATED);
        assert_eq!(NetPattern::Net11.preset_dimensions(), BoxDimensions::ELONGATED);
        assert_eq!(NetPattern::Net2.preset_dimensions(), BoxDimensions::PRISM);
        assert_eq!(NetPattern::Net8.preset_dimensions(), BoxDimensions::PRISM);
    }

    #[test]
    fn test_cycle() {
        assert_eq!(NetPattern::Net11.next(), NetPattern::Net1);
        assert_eq!(NetPattern::Net1.previous(), NetPattern::Net11);
        assert_eq!(NetPattern::Net4.next(), NetPattern::Net5);
    }
}
