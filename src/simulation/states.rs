//! Core state types for the pendulum simulation.
//!
//! Positions live on the unit square `[0,1]²` (x right, y down, matching the
//! output grid). Each released pendulum owns its own `Pendulum`; magnets are
//! shared read-only by every simulation.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Center of the plane, where the string is anchored
pub fn center() -> NVec2 {
    NVec2::new(0.5, 0.5)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
}

impl Pendulum {
    /// Pendulum held still at `x`
    pub fn at_rest(x: NVec2) -> Self {
        Self {
            x,
            v: NVec2::zeros(),
        }
    }

    /// Squared speed, compared against the rest threshold
    pub fn speed2(&self) -> f64 {
        self.v.norm_squared()
    }
}

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnet {
    pub x: NVec2,     // position on the plane
    pub color: Rgb,   // derived from registry order, see `MagnetRegistry`
}

/// Planar distance between two points
pub fn dist(a: &NVec2, b: &NVec2) -> f64 {
    (a - b).norm()
}
