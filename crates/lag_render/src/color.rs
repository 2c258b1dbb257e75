//! Colors as written in widget configuration
//!
//! Accepts `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` and `rgba(r, g, b, a)` where
//! `a` is in `0.0..=1.0`. Serializes back to `#RRGGBBAA`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("hex color '{0}' must have 6 or 8 digits")]
    HexLength(String),

    #[error("invalid hex digits in '{0}'")]
    HexDigits(String),

    #[error("'{0}' is not a hex, rgb() or rgba() color")]
    Format(String),

    #[error("channel '{channel}' in '{color}' is out of range")]
    Channel { color: String, channel: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Source-over blend of `self` onto `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.a as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.a as u32;
        let inv = 255 - sa;
        let out_a = sa + da * inv / 255;
        let blend = |s: u8, d: u8| -> u8 {
            let num = s as u32 * sa * 255 + d as u32 * da * inv;
            (num / (out_a * 255)) as u8
        };
        Rgba::new(
            blend(self.r, dst.r),
            blend(self.g, dst.g),
            blend(self.b, dst.b),
            out_a as u8,
        )
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::HexLength(hex.to_string()));
        }
        let byte = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ColorParseError::HexDigits(hex.to_string()))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
    }

    fn parse_function(input: &str, args: &str, with_alpha: bool) -> Result<Self, ColorParseError> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorParseError::Format(input.to_string()));
        }

        let out_of_range = |channel: &str| ColorParseError::Channel {
            color: input.to_string(),
            channel: channel.to_string(),
        };
        let channel = |part: &str| part.parse::<u8>().map_err(|_| out_of_range(part));

        let a = if with_alpha {
            let alpha: f32 = parts[3].parse().map_err(|_| out_of_range(parts[3]))?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(out_of_range(parts[3]));
            }
            (alpha * 255.0).round() as u8
        } else {
            255
        };
        Ok(Self::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(args) = s.strip_prefix("rgba(").and_then(|rest| rest.strip_suffix(')')) {
            return Self::parse_function(s, args, true);
        }
        if let Some(args) = s.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            return Self::parse_function(s, args, false);
        }
        Err(ColorParseError::Format(s.to_string()))
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}
