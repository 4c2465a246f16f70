use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use ecow::{EcoString, eco_format};

/// An 8-bit RGBA color.
///
/// Channels are discretized to 256 levels; a real component in `[0, 1]` maps
/// to `round(255 * c)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct RgbaColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl RgbaColor {
    /// Construct a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// Construct an opaque color from real components in `[0, 1]`.
    pub fn from_fractions(r: f64, g: f64, b: f64) -> Result<Self, ParseColorError> {
        Self::from_fractions_alpha(r, g, b, 1.0)
    }

    /// Construct a color from real components in `[0, 1]`.
    pub fn from_fractions_alpha(
        r: f64,
        g: f64,
        b: f64,
        a: f64,
    ) -> Result<Self, ParseColorError> {
        let quantize = |c: f64| {
            if !(0.0..=1.0).contains(&c) {
                return Err(ParseColorError::OutOfRange);
            }
            // Ties round to even, matching the reference catalog's
            // quantization (`0.7 * 255 = 178.5` becomes 178, not 179).
            Ok((c * 255.0).round_ties_even() as u8)
        };
        Ok(Self::new(quantize(r)?, quantize(g)?, quantize(b)?, quantize(a)?))
    }

    /// The color whose every channel is `255 - channel`.
    ///
    /// The alpha channel is preserved. Used to pick a legible label color
    /// against a fill in this color.
    pub const fn invert(self) -> Self {
        Self {
            r: u8::MAX - self.r,
            g: u8::MAX - self.g,
            b: u8::MAX - self.b,
            a: self.a,
        }
    }

    /// The canonical eight-digit hex serialization, like `#3333b2ff`.
    ///
    /// This doubles as the color's identity for comparisons in rendered
    /// output.
    pub fn to_hex(self) -> EcoString {
        eco_format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// The six-digit hex serialization without the alpha channel.
    pub fn to_hex_rgb(self) -> EcoString {
        eco_format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for RgbaColor {
    type Err = ParseColorError;

    /// Parse a color specification: a named CSS color like `white` or a hex
    /// string with three, four, six or eight digits and an optional leading
    /// hashtag. Both lower and upper case are fine.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim();
        if spec.chars().all(|c| c.is_ascii_alphabetic()) && !spec.is_empty() {
            if let Some(color) = named(spec) {
                return Ok(color);
            }
        }

        let hex = spec.strip_prefix('#').unwrap_or(spec);
        if hex.chars().any(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::Unknown(spec.into()));
        }

        let len = hex.len();
        let long = len == 6 || len == 8;
        let short = len == 3 || len == 4;
        let alpha = len == 4 || len == 8;
        if !long && !short {
            return Err(ParseColorError::BadLength(len));
        }

        let mut channels: [u8; 4] = [u8::MAX; 4];
        for (i, channel) in channels.iter_mut().enumerate().take(if alpha { 4 } else { 3 })
        {
            let digits = if long { 2 } else { 1 };
            let part = &hex[i * digits..(i + 1) * digits];
            let value = u8::from_str_radix(part, 16)
                .map_err(|_| ParseColorError::Unknown(spec.into()))?;
            // Shorthand digits duplicate, `a` becomes `aa`.
            *channel = if short { value * 17 } else { value };
        }

        Ok(Self::new(channels[0], channels[1], channels[2], channels[3]))
    }
}

impl Debug for RgbaColor {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        } else {
            write!(f, "rgb(\"{}\")", self.to_hex())
        }
    }
}

/// Look up a named CSS color.
fn named(name: &str) -> Option<RgbaColor> {
    Some(match name.to_ascii_lowercase().as_str() {
        "aqua" | "cyan" => RgbaColor::opaque(0x00, 0xff, 0xff),
        "black" => RgbaColor::opaque(0x00, 0x00, 0x00),
        "blue" => RgbaColor::opaque(0x00, 0x00, 0xff),
        "brown" => RgbaColor::opaque(0xa5, 0x2a, 0x2a),
        "fuchsia" | "magenta" => RgbaColor::opaque(0xff, 0x00, 0xff),
        "gray" | "grey" => RgbaColor::opaque(0x80, 0x80, 0x80),
        "green" => RgbaColor::opaque(0x00, 0x80, 0x00),
        "lime" => RgbaColor::opaque(0x00, 0xff, 0x00),
        "maroon" => RgbaColor::opaque(0x80, 0x00, 0x00),
        "navy" => RgbaColor::opaque(0x00, 0x00, 0x80),
        "olive" => RgbaColor::opaque(0x80, 0x80, 0x00),
        "orange" => RgbaColor::opaque(0xff, 0xa5, 0x00),
        "purple" => RgbaColor::opaque(0x80, 0x00, 0x80),
        "red" => RgbaColor::opaque(0xff, 0x00, 0x00),
        "silver" => RgbaColor::opaque(0xc0, 0xc0, 0xc0),
        "teal" => RgbaColor::opaque(0x00, 0x80, 0x80),
        "white" => RgbaColor::opaque(0xff, 0xff, 0xff),
        "yellow" => RgbaColor::opaque(0xff, 0xff, 0x00),
        _ => return None,
    })
}

/// A color specification that could not be parsed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ParseColorError {
    /// The hex string has an unsupported number of digits.
    BadLength(usize),
    /// A real component was outside of `[0, 1]`.
    OutOfRange,
    /// Neither a known color name nor a hex string.
    Unknown(EcoString),
}

impl std::error::Error for ParseColorError {}

impl Display for ParseColorError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::BadLength(len) => {
                write!(f, "color string has wrong length ({len} digits)")
            }
            Self::OutOfRange => f.pad("color component must be between 0 and 1"),
            Self::Unknown(spec) => write!(f, "unknown color specification ({spec})"),
        }
    }
}

impl From<ParseColorError> for EcoString {
    fn from(err: ParseColorError) -> Self {
        eco_format!("{err}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_strings() {
        #[track_caller]
        fn test(spec: &str, r: u8, g: u8, b: u8, a: u8) {
            assert_eq!(spec.parse(), Ok(RgbaColor::new(r, g, b, a)));
        }

        test("f61243ff", 0xf6, 0x12, 0x43, 0xff);
        test("#b3d8b3", 0xb3, 0xd8, 0xb3, 0xff);
        test("fCd2a9AD", 0xfc, 0xd2, 0xa9, 0xad);
        test("233", 0x22, 0x33, 0x33, 0xff);
        test("#111b", 0x11, 0x11, 0x11, 0xbb);
    }

    #[test]
    fn test_parse_named_colors() {
        #[track_caller]
        fn test(spec: &str, r: u8, g: u8, b: u8) {
            assert_eq!(spec.parse(), Ok(RgbaColor::opaque(r, g, b)));
        }

        test("black", 0x00, 0x00, 0x00);
        test("White", 0xff, 0xff, 0xff);
        test("red", 0xff, 0x00, 0x00);
        test("green", 0x00, 0x80, 0x00);
        test("GRAY", 0x80, 0x80, 0x80);
    }

    #[test]
    fn test_parse_invalid_specs() {
        #[track_caller]
        fn test(spec: &str, err: ParseColorError) {
            assert_eq!(RgbaColor::from_str(spec), Err(err));
        }

        test("a5", ParseColorError::BadLength(2));
        test("12345", ParseColorError::BadLength(5));
        test("f075ff011", ParseColorError::BadLength(9));
        test("hmmm", ParseColorError::Unknown("hmmm".into()));
        test("14B2AH", ParseColorError::Unknown("14B2AH".into()));
        test("", ParseColorError::BadLength(0));
    }

    #[test]
    fn test_from_fractions() {
        // Both blue components are exact halves: 178.5 ties to even 178
        // and 127.5 ties to even 128.
        assert_eq!(
            RgbaColor::from_fractions(0.2, 0.2, 0.7),
            Ok(RgbaColor::opaque(0x33, 0x33, 0xb2)),
        );
        assert_eq!(
            RgbaColor::from_fractions(1.0, 0.0, 0.5),
            Ok(RgbaColor::opaque(0xff, 0x00, 0x80)),
        );
        assert_eq!(
            RgbaColor::from_fractions(1.2, 0.0, 0.0),
            Err(ParseColorError::OutOfRange),
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        for color in [
            RgbaColor::new(0x00, 0x00, 0x00, 0xff),
            RgbaColor::new(0xff, 0xff, 0xff, 0x00),
            RgbaColor::new(0x12, 0x34, 0x56, 0x78),
        ] {
            assert_eq!(color.to_hex().parse(), Ok(color));
        }

        let color = RgbaColor::new(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.to_hex(), "#12345678");
        assert_eq!(color.to_hex_rgb(), "#123456");
    }

    #[test]
    fn test_invert() {
        let black = RgbaColor::opaque(0x00, 0x00, 0x00);
        let white = RgbaColor::opaque(0xff, 0xff, 0xff);
        assert_eq!(black.invert(), white);
        assert_eq!(white.invert(), black);

        // Inversion is an involution and keeps the alpha channel.
        let color = RgbaColor::new(0x12, 0x9a, 0xcd, 0x42);
        assert_eq!(color.invert().invert(), color);
        assert_eq!(color.invert().a, 0x42);
    }
}
