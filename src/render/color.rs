use crate::error::{BragError, Result};
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Accepts `RGB`, `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    pub fn parse_hex(input: &str) -> Result<Self> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BragError::InvalidColor(format!(
                "invalid hex color format: '{input}'"
            )));
        }

        decode(hex).map_err(|e| match e {
            Some(e) => BragError::InvalidColor(format!("invalid hex color format: '{input}': {e}")),
            None => BragError::InvalidColor(format!(
                "hex color must be 3, 6, or 8 characters: '{input}'"
            )),
        })
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub fn to_text(self) -> cosmic_text::Color {
        cosmic_text::Color::rgba(self.r, self.g, self.b, self.a)
    }
}

fn decode(hex: &str) -> std::result::Result<Rgba, Option<ParseIntError>> {
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|n| n * 17);

    match hex.len() {
        3 => Ok(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => Err(None),
    }
}
