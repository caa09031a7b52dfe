//! Gradient shades for multi-syllable hits.
//!
//! A hit spanning `k` syllables is drawn from light to dark around the
//! scheme's base color, keeping hue and saturation fixed.

use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

const LIGHT_OFFSET: f32 = 20.0;
const LIGHT_CEILING: f32 = 85.0;
const DARK_OFFSET: f32 = 15.0;
const DARK_FLOOR: f32 = 20.0;

/// Hex color parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    MissingHash(String),
    InvalidLength(String),
    InvalidDigit(String),
}

impl Display for ColorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHash(value) => write!(f, "hex color must start with `#`: `{value}`"),
            Self::InvalidLength(value) => {
                write!(f, "hex color must have 3 or 6 digits: `{value}`")
            }
            Self::InvalidDigit(value) => write!(f, "hex color has a non-hex digit: `{value}`"),
        }
    }
}

impl Error for ColorParseError {}

/// 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Rgb {
    /// Parses `#rgb` or `#rrggbb`, case-insensitive.
    pub fn parse_hex(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(trimmed.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(trimmed.to_string()));
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(ColorParseError::InvalidLength(trimmed.to_string())),
        };
        let channel = |at: usize| {
            u8::from_str_radix(&expanded[at..at + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigit(trimmed.to_string()))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        let (h, s) = if delta == 0.0 {
            (0.0, 0.0)
        } else {
            let s = if l < 0.5 {
                delta / (max + min)
            } else {
                delta / (2.0 - max - min)
            };
            let h = if max == r {
                ((g - b) / delta + if g < b { 6.0 } else { 0.0 }) / 6.0
            } else if max == g {
                ((b - r) / delta + 2.0) / 6.0
            } else {
                ((r - g) / delta + 4.0) / 6.0
            };
            (h * 360.0, s * 100.0)
        };

        Hsl { h, s, l: l * 100.0 }
    }
}

impl Hsl {
    pub fn to_rgb(self) -> Rgb {
        let h = self.h / 360.0;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };

        Rgb {
            r: to_byte(r),
            g: to_byte(g),
            b: to_byte(b),
        }
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn is_valid_hex(value: &str) -> bool {
    Rgb::parse_hex(value).is_ok()
}

/// Returns `count` colors for a hit spanning `count` syllables.
///
/// Position 0 is the lightest. `count == 1` returns the base color as
/// given; an unparsable base is repeated unchanged.
pub fn get_scheme_shades(base_color: &str, count: usize) -> Vec<String> {
    if count <= 1 {
        return vec![base_color.to_string(); count];
    }

    let base = match Rgb::parse_hex(base_color) {
        Ok(rgb) => rgb.to_hsl(),
        Err(err) => {
            warn!("event=scheme_shades module=scheme status=fallback reason={err}");
            return vec![base_color.to_string(); count];
        }
    };

    (0..count).map(|position| shade(base, count, position)).collect()
}

/// The color `get_scheme_shades(base_color, count)` puts at `position`.
///
/// Computes only that one color, so `count` may be arbitrarily large.
pub fn scheme_shade_at(base_color: &str, count: usize, position: usize) -> String {
    if count <= 1 {
        return base_color.to_string();
    }
    match Rgb::parse_hex(base_color) {
        Ok(rgb) => shade(rgb.to_hsl(), count, position.min(count - 1)),
        Err(_) => base_color.to_string(),
    }
}

fn shade(base: Hsl, count: usize, position: usize) -> String {
    let light = (base.l + LIGHT_OFFSET).min(LIGHT_CEILING);
    let dark = (base.l - DARK_OFFSET).max(DARK_FLOOR);
    let steps = (count - 1) as f32;
    let l = light + (dark - light) * position as f32 / steps;
    Hsl { l, ..base }.to_rgb().to_hex()
}
