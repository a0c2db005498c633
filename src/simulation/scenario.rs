//! Build a fully-initialized runtime scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario` bundle:
//! - engine settings (`Engine`)
//! - live parameters (`Parameters`)
//! - magnet registry, sweep generator and preview pendulum
//! - active force set (`AccelSet`)
//!
//! With the `viewer` feature the bundle is a bevy `Resource` that the viewer
//! systems drive once per frame.

use log::warn;

use crate::configuration::config::ScenarioConfig;
use crate::error::{Error, Result};
use crate::simulation::engine::Engine;
use crate::simulation::forces::AccelSet;
use crate::simulation::generator::{grid_dims, Generator, Progress};
use crate::simulation::integrator::euler_step;
use crate::simulation::magnets::MagnetRegistry;
use crate::simulation::params::Parameters;
use crate::simulation::states::{center, NVec2, Pendulum};

#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub surface: (f64, f64),
    pub magnets: MagnetRegistry,
    pub generator: Generator,
    pub preview: Pendulum,
    pub forces: AccelSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let parameters = cfg.parameters.validate()?;

        let engine = Engine {
            rows_per_tick: cfg.engine.rows_per_tick.max(1),
        };

        let magnets = MagnetRegistry::from_positions(cfg.magnet_positions()?);

        let surface = (cfg.surface.width, cfg.surface.height);
        let forces = AccelSet::pendulum();
        let generator = Generator::for_surface(surface.0, surface.1, parameters.resolution)?;

        Ok(Self {
            engine,
            parameters,
            surface,
            magnets,
            generator,
            preview: Pendulum::at_rest(center()),
            forces,
        })
    }

    /// Start a sweep with the current parameters, or stop the running one
    pub fn toggle_generation(&mut self) -> bool {
        self.generator.toggle(&self.parameters)
    }

    /// One host tick of sweep work, reading the registry as it is now
    pub fn tick(&mut self) -> Progress {
        self.generator.run_rows(self.engine.rows_per_tick, self.magnets.snapshot())
    }

    /// Advance the preview pendulum by one step with live parameters
    pub fn step_preview(&mut self) {
        euler_step(&mut self.preview, &self.forces, self.magnets.snapshot(), &self.parameters);
    }

    pub fn place_preview(&mut self, x: NVec2) {
        self.preview = Pendulum::at_rest(x);
    }

    /// Remove the magnet at `x` or add one there
    pub fn toggle_magnet(&mut self, x: NVec2) -> bool {
        self.magnets.toggle_at(x)
    }

    /// Display surface changed size; reallocates the grid and stops any sweep.
    /// A rejected size leaves the surface, grid and sweep as they were.
    pub fn resize_surface(&mut self, width: f64, height: f64) -> Result<()> {
        self.reset_grid(width, height, self.parameters.resolution)?;
        self.surface = (width, height);
        Ok(())
    }

    /// New grid scale; reallocates the grid and stops any sweep.
    /// A rejected scale leaves the parameters, grid and sweep as they were.
    pub fn set_resolution(&mut self, resolution: f64) -> Result<()> {
        if !(resolution.is_finite() && resolution > 0.0) {
            warn!("rejected resolution {}", resolution);
            return Err(Error::InvalidParameter {
                name: "resolution",
                value: resolution,
            });
        }
        let (w, h) = self.surface;
        self.reset_grid(w, h, resolution)?;
        self.parameters.resolution = resolution;
        Ok(())
    }

    fn reset_grid(&mut self, width: f64, height: f64, resolution: f64) -> Result<()> {
        match grid_dims(width, height, resolution) {
            Ok((gw, gh)) => self.generator.resize(gw, gh),
            Err(e) => {
                warn!("surface {}x{} at resolution {}: {}", width, height, resolution, e);
                Err(e)
            }
        }
    }
}
