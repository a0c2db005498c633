//! Color assignment: magnet hues and settle-time shading

use crate::simulation::settle::SLEEP_STEPS;
use crate::simulation::states::Rgb;

/// One RGBA pixel
pub type Rgba = [u8; 4];

/// Unwritten or unattributed pixel
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Standard six-sector HSV to RGB. All inputs in `[0, 1]`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(channel(r), channel(g), channel(b))
}

fn channel(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue of the `k`-th of `n` magnets, spread evenly over `[0, 1)`
pub fn magnet_hue(k: usize, n: usize) -> Rgb {
    hsv_to_rgb(k as f64 / n as f64, 1.0, 1.0)
}

/// Brightness of a pixel whose rest was confirmed at step index `settle_step`
///
/// Cubic falloff `(1 - (step - 200) / (max_steps - 200))³`: fast settlers are
/// bright, runs that use the whole budget fade to black. Clamped to `[0, 1]`,
/// so the earliest settle (index 199) is full brightness.
pub fn brightness(settle_step: usize, max_steps: usize) -> f64 {
    if max_steps <= SLEEP_STEPS {
        return 1.0;
    }
    let span = (max_steps - SLEEP_STEPS) as f64;
    let late = settle_step as f64 - SLEEP_STEPS as f64;
    (1.0 - late / span).clamp(0.0, 1.0).powi(3)
}

/// Opaque pixel of `color` dimmed by settle time
pub fn shade(color: Rgb, settle_step: usize, max_steps: usize) -> Rgba {
    let v = brightness(settle_step, max_steps);
    [channel_scaled(color.r, v), channel_scaled(color.g, v), channel_scaled(color.b, v), 255]
}

fn channel_scaled(c: u8, v: f64) -> u8 {
    (c as f64 * v).round().clamp(0.0, 255.0) as u8
}
