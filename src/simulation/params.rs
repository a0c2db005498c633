//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - grid scale (`resolution`) and step size (`time_step`),
//! - force strengths (`weight`, `magnet_force`) and damping (`drag`),
//! - geometry (`magnet_depth`, `string_length`),
//! - per-pixel step budget (`max_steps`) and a display-only flag

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub resolution: f64, // output grid pixels per surface pixel
    pub time_step: f64, // step size dt
    pub weight: f64, // restoring force strength
    pub magnet_force: f64, // magnet strength
    pub drag: f64, // velocity lost per unit time, in [0, 1]
    pub magnet_depth: f64, // magnets sit this far below the plane (softening)
    pub string_length: f64, // pendulum string length
    pub max_steps: usize, // per-pixel step budget
    pub hide_magnets: bool, // display only
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            resolution: 0.125,
            time_step: 0.3,
            weight: 0.1,
            magnet_force: 0.001,
            drag: 0.05,
            magnet_depth: 0.1,
            string_length: 2.0,
            max_steps: 1000,
            hide_magnets: false,
        }
    }
}

impl Parameters {
    /// Horizontal projection of the string at full swing
    pub fn string_projection(&self) -> f64 {
        std::f64::consts::SQRT_2 / 2.0 * self.string_length
    }

    /// Velocity retention factor applied once per step
    pub fn drag_factor(&self) -> f64 {
        (1.0 - self.drag).powf(self.time_step)
    }
}
