use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode `#RRGGBB` (the leading `#` is optional, digits are case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("Invalid hex color '{hex}': expected 6 hex digits");
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .with_context(|| format!("Invalid hex color '{hex}'"))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear interpolation from `self` towards `to`, truncating each channel.
    ///
    /// `ratio` is expected in `0.0..=1.0`; a ratio of 0 yields `self` exactly.
    pub fn lerp(self, to: Rgb, ratio: f64) -> Rgb {
        let mix = |from: u8, to: u8| {
            let from = f64::from(from);
            (from + (f64::from(to) - from) * ratio) as u8
        };

        Rgb::new(mix(self.r, to.r), mix(self.g, to.g), mix(self.b, to.b))
    }
}

/// Parses any CSS color (`#fff`, `purple`, `rgb(...)`); alpha is discarded.
impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let color = css_color::Srgb::from_str(s)
            .map_err(|_| anyhow::anyhow!("Invalid CSS color '{s}'"))?;

        Ok(Rgb::new(
            (color.red * 255.).round() as u8,
            (color.green * 255.).round() as u8,
            (color.blue * 255.).round() as u8,
        ))
    }
}

impl TryFrom<String> for Rgb {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(color: Rgb) -> Self {
        image::Rgb([color.r, color.g, color.b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#35105A").unwrap(), Rgb::new(0x35, 0x10, 0x5A));
        assert_eq!(Rgb::from_hex("5b0ec8").unwrap(), Rgb::new(0x5B, 0x0E, 0xC8));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#12345", "#1234567", "#GG0000", "#ééé", "+F+F+F"] {
            assert!(Rgb::from_hex(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn hex_round_trips() {
        for hex in ["#FF5DA2", "#FFB347", "#39E0C1", "#7C4DFF"] {
            assert_eq!(Rgb::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn lerp_truncates_towards_start() {
        let top = Rgb::new(0x35, 0x10, 0x5A);
        let bottom = Rgb::new(0x5B, 0x0E, 0xC8);

        assert_eq!(top.lerp(bottom, 0.0), top);
        // 16 + (14 - 16) * 0.3 = 15.4
        assert_eq!(top.lerp(bottom, 0.3).g, 15);
        assert_eq!(top.lerp(bottom, 0.5), Rgb::new(72, 15, 145));
    }

    #[test]
    fn parses_css_colors() {
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!("black".parse::<Rgb>().unwrap(), Rgb::BLACK);
        assert!("not-a-color".parse::<Rgb>().is_err());
    }
}
