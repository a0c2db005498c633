//! Configuration types for loading scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – scheduling options (rows per host tick)
//! - [`ParametersConfig`] – the nine simulation parameters
//! - [`SurfaceConfig`]    – display surface size the grid is derived from
//! - [`ScenarioConfig`]   – top-level wrapper, plus the initial magnet positions
//!
//! Every section and field is optional and falls back to the defaults below.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   rows_per_tick: 1
//!
//! parameters:
//!   resolution: 0.125       # grid pixels per surface pixel
//!   time_step: 0.3
//!   weight: 0.1             # restoring force
//!   magnet_force: 0.001
//!   drag: 0.05
//!   magnet_depth: 0.1       # must be > 0
//!   string_length: 2.0      # must be > 0
//!   max_steps: 1000
//!   hide_magnets: false
//!
//! surface:
//!   width: 800
//!   height: 600
//!
//! magnets:
//!   - [0.5, 0.25]
//!   - [0.28, 0.64]
//! ```

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec2;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub rows_per_tick: usize, // rows computed per host tick before yielding
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { rows_per_tick: 1 }
    }
}

/// Simulation parameters as written in the scenario file
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub resolution: f64,
    pub time_step: f64,
    pub weight: f64,
    pub magnet_force: f64,
    pub drag: f64,
    pub magnet_depth: f64,
    pub string_length: f64,
    pub max_steps: usize,
    pub hide_magnets: bool,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            resolution: p.resolution,
            time_step: p.time_step,
            weight: p.weight,
            magnet_force: p.magnet_force,
            drag: p.drag,
            magnet_depth: p.magnet_depth,
            string_length: p.string_length,
            max_steps: p.max_steps,
            hide_magnets: p.hide_magnets,
        }
    }
}

impl ParametersConfig {
    /// Range-check and convert to runtime `Parameters`
    pub fn validate(&self) -> Result<Parameters> {
        let checks: [(&'static str, f64, bool); 7] = [
            ("resolution", self.resolution, self.resolution > 0.0),
            ("time_step", self.time_step, self.time_step > 0.0),
            ("weight", self.weight, true),
            ("magnet_force", self.magnet_force, true),
            ("drag", self.drag, (0.0..=1.0).contains(&self.drag)),
            ("magnet_depth", self.magnet_depth, self.magnet_depth > 0.0),
            ("string_length", self.string_length, self.string_length > 0.0),
        ];
        for (name, value, in_range) in checks {
            if !value.is_finite() || !in_range {
                return Err(Error::InvalidParameter { name, value });
            }
        }

        Ok(Parameters {
            resolution: self.resolution,
            time_step: self.time_step,
            weight: self.weight,
            magnet_force: self.magnet_force,
            drag: self.drag,
            magnet_depth: self.magnet_depth,
            string_length: self.string_length,
            max_steps: self.max_steps,
            hide_magnets: self.hide_magnets,
        })
    }
}

/// Display surface size in pixels; the grid is this times `resolution`
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // scheduling
    pub parameters: ParametersConfig, // simulation parameters
    pub surface: SurfaceConfig, // display surface size
    pub magnets: Vec<[f64; 2]>, // initial magnet positions in [0,1]², in registry order
}

impl ScenarioConfig {
    /// Initial magnet positions; every coordinate must be finite
    pub fn magnet_positions(&self) -> Result<Vec<NVec2>> {
        self.magnets
            .iter()
            .map(|&[x, y]| match [x, y].into_iter().find(|c| !c.is_finite()) {
                Some(value) => Err(Error::InvalidParameter { name: "magnets", value }),
                None => Ok(NVec2::new(x, y)),
            })
            .collect()
    }
}
