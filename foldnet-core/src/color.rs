/// Colour strings used for faces, labels and markers
use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::char,
    combinator::{all_consuming, map, map_res, opt, value},
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ColorError;
use crate::FACE_COUNT;

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    /// Corner marker red.
    pub const MARKER: Rgb = Rgb::new(0xef, 0x44, 0x44);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` (the `#` is optional) or `white`/`black`.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        all_consuming(color)(input.trim())
            .map(|(_, rgb)| rgb)
            .map_err(|_| ColorError::Invalid(input.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

/// Palette used whenever the configured face colours are unusable.
pub const DEFAULT_PALETTE: [Rgb; FACE_COUNT] = [
    Rgb::new(0xef, 0x44, 0x44),
    Rgb::new(0x22, 0xc5, 0x5e),
    Rgb::new(0x3b, 0x82, 0xf6),
    Rgb::new(0xea, 0xb3, 0x08),
    Rgb::new(0xa8, 0x55, 0xf7),
    Rgb::new(0x06, 0xb6, 0xd4),
];

/// Resolve six configured colour strings into a palette.
///
/// Anything other than exactly six parsable colours yields
/// [`DEFAULT_PALETTE`] instead of an error.
pub fn resolve_palette<S: AsRef<str>>(colors: &[S]) -> [Rgb; FACE_COUNT] {
    if colors.len() != FACE_COUNT {
        debug!(
            count = colors.len(),
            "face colour list has wrong length, using default palette"
        );
        return DEFAULT_PALETTE;
    }

    let mut palette = DEFAULT_PALETTE;
    for (slot, raw) in palette.iter_mut().zip(colors) {
        match Rgb::parse(raw.as_ref()) {
            Ok(rgb) => *slot = rgb,
            Err(err) => {
                debug!(%err, "unparsable face colour, using default palette");
                return DEFAULT_PALETTE;
            }
        }
    }
    palette
}

/// Resolve the configured label colour, falling back to white.
pub fn resolve_label_color(raw: &str) -> Rgb {
    Rgb::parse(raw).unwrap_or_else(|err| {
        debug!(%err, "unparsable label colour, using white");
        Rgb::WHITE
    })
}

fn color(input: &str) -> IResult<&str, Rgb> {
    alt((
        value(Rgb::WHITE, tag_no_case("white")),
        value(Rgb::BLACK, tag_no_case("black")),
        preceded(opt(char('#')), alt((long_hex, short_hex))),
    ))(input)
}

fn long_hex(input: &str) -> IResult<&str, Rgb> {
    map(tuple((hex_pair, hex_pair, hex_pair)), |(r, g, b)| {
        Rgb::new(r, g, b)
    })(input)
}

fn short_hex(input: &str) -> IResult<&str, Rgb> {
    map(tuple((hex_digit, hex_digit, hex_digit)), |(r, g, b)| {
        Rgb::new(r * 17, g * 17, b * 17)
    })(input)
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

fn hex_digit(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!(Rgb::parse("#EF4444").unwrap(), Rgb::new(0xef, 0x44, 0x44));
        assert_eq!(Rgb::parse("22c55e").unwrap(), Rgb::new(0x22, 0xc5, 0x5e));
        assert_eq!(Rgb::parse("#fff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::parse("#0a0").unwrap(), Rgb::new(0x00, 0xaa, 0x00));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Rgb::parse("white").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::parse("Black").unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_label_colour_fallback() {
        assert_eq!(resolve_label_color("#3b82f6"), Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!(resolve_label_color("black"), Rgb::BLACK);
        assert_eq!(resolve_label_color("not a colour"), Rgb::WHITE);
        assert_eq!(resolve_label_color(""), Rgb::WHITE);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgb::parse("#ffff").is_err());
        assert!(Rgb::parse("#gg0000").is_err());
        assert!(Rgb::parse("").is_err());
        assert!(Rgb::parse("whitey").is_err());
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Rgb::new(0xA8, 0x55, 0xF7).to_string(), "#a855f7");
    }

    #[test]
    fn test_palette_fallback() {
        let custom = ["#000", "#111", "#222", "#333", "#444", "#555"];
        let palette = resolve_palette(&custom);
        assert_eq!(palette[1], Rgb::new(0x11, 0x11, 0x11));

        assert_eq!(resolve_palette(&custom[..5]), DEFAULT_PALETTE);

        let broken = ["#000", "#111", "nope", "#333", "#444", "#555"];
        assert_eq!(resolve_palette(&broken), DEFAULT_PALETTE);
    }
}
