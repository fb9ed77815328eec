//! Colour handling for the surface.
//!
//! Vol maps to a linear RGB ramp: red rises with vol, green and blue fall.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// From 0xRRGGBB
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Same colour with alpha from an opacity in [0, 1]
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: channel(opacity * 255.0),
            ..self
        }
    }

    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Slopes of the vol → colour ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    pub red_slope: f64,
    pub green_slope: f64,
    pub blue_slope: f64,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            red_slope: 500.0,
            green_slope: 300.0,
            blue_slope: 200.0,
        }
    }
}

impl ColorRamp {
    /// Colour for an implied vol (fraction)
    pub fn color(&self, vol: f64) -> Rgba {
        Rgba::rgb(
            channel(vol * self.red_slope),
            channel(255.0 - vol * self.green_slope),
            channel(255.0 - vol * self.blue_slope),
        )
    }
}

/// Round and clamp to [0, 255]
fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
