pub mod simulation;
pub mod configuration;
#[cfg(feature = "viewer")]
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use error::{Error, Result};

pub use simulation::states::{Pendulum, Magnet, Rgb, NVec2};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, Restoring, MagnetPull};
pub use simulation::integrator::euler_step;
pub use simulation::settle::{release, nearest_magnet, Outcome, SettleDetector};
pub use simulation::color::{hsv_to_rgb, shade, Rgba, TRANSPARENT};
pub use simulation::magnets::MagnetRegistry;
pub use simulation::generator::{grid_dims, render_pixel, Generator, GenState, OutputBuffer, Progress, RunFlag};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, SurfaceConfig, ScenarioConfig};

#[cfg(feature = "viewer")]
pub use visualization::viewer::run_viewer;

pub use benchmark::benchmark::bench_sweep;
